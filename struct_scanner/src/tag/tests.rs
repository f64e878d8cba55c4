//! Unit tests for the tag parser.

use anyhow::{Result, ensure};
use rstest::rstest;

use super::Tags;
use crate::TagError;

#[test]
fn empty_text_yields_no_tags() -> Result<()> {
    let tags = Tags::parse("")?;
    ensure!(tags.is_empty());
    ensure!(Tags::parse("   ")?.is_empty());
    Ok(())
}

#[test]
fn keeps_declaration_order() -> Result<()> {
    let tags = Tags::parse(r#"env:"PORT" default:"8080"  map:"""#)?;
    let pairs: Vec<_> = tags.iter().collect();
    ensure!(
        pairs == [("env", "PORT"), ("default", "8080"), ("map", "")],
        "got {pairs:?}"
    );
    ensure!(tags.contains("map"));
    ensure!(tags.get("map") == Some(""));
    ensure!(tags.get("absent").is_none());
    Ok(())
}

#[test]
fn repeated_names_keep_first_position_and_last_value() -> Result<()> {
    let tags = Tags::parse(r#"a:"1" b:"2" a:"3""#)?;
    let pairs: Vec<_> = (&tags).into_iter().collect();
    ensure!(pairs == [("a", "3"), ("b", "2")], "got {pairs:?}");
    Ok(())
}

#[rstest]
#[case(r#"a:"say \"hi\"""#, "say \"hi\"")]
#[case(r#"a:"back\\slash""#, "back\\slash")]
#[case(r#"a:"line\nbreak\ttab\r""#, "line\nbreak\ttab\r")]
#[case("a:\"raw\nnewline\"", "raw\nnewline")]
#[case(r#"a:"colon: and spaces""#, "colon: and spaces")]
fn unescapes_values(#[case] raw: &str, #[case] expected: &str) -> Result<()> {
    let tags = Tags::parse(raw)?;
    ensure!(tags.get("a") == Some(expected), "got {tags:?}");
    Ok(())
}

#[rstest]
#[case(r#"valid:"attr1" :"missing_name""#, "missing tag name")]
#[case(r#"::"x""#, "missing tag name")]
#[case(r#"a::"x""#, "missing tag name")]
#[case(r#"valid:"attr1" missing_value:"#, "has no value")]
#[case("lonely", "has no value")]
#[case("line_break\n\t\t\"attr1\"", "code 10")]
#[case(r#"line_break:attr1""#, "missing quotes")]
#[case(r#"line_break:"attr1"#, "missing end quote")]
#[case(r#"a:"bad \q escape""#, "invalid escape `\\q`")]
fn rejects_malformed_tags(#[case] raw: &str, #[case] phrase: &str) -> Result<()> {
    let Err(err) = Tags::parse(raw) else {
        anyhow::bail!("`{raw}` should not parse");
    };
    let message = err.to_string();
    ensure!(message.contains("malformed tag"), "{message}");
    ensure!(message.contains(raw), "{message}");
    ensure!(message.contains(phrase), "{message}");
    Ok(())
}

#[test]
fn reports_the_offset_of_control_characters() {
    assert_eq!(
        Tags::parse("a:\"x\"\u{7}"),
        Err(TagError::ControlCharacter {
            tag: "a:\"x\"\u{7}".into(),
            code: 7,
            offset: 5,
        })
    );
}

#[test]
fn reports_the_offset_of_a_doubled_colon() {
    assert_eq!(
        Tags::parse(r#"env:"A" a::"x""#),
        Err(TagError::MissingName {
            tag: r#"env:"A" a::"x""#.into(),
            offset: 10,
        })
    );
}
