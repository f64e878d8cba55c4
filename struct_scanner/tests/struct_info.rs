//! Integration tests for `get_struct_info`.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use struct_scanner::{Decoded, Kind, Scan, StructInfo, Type, Value, decode, decoder_fn, get_struct_info};
use test_helpers::errors::expect_message;

#[derive(Debug, Default, Scan)]
struct MyStruct {
    pub a: i64,
}

#[derive(Debug, Default, Scan)]
struct Listing {
    #[scan(tag = r#"env:"A" default:"1""#)]
    pub a: i64,
    #[scan(tag = r#"prefix:"NESTED_""#)]
    pub nested: Option<MyStruct>,
}

#[rstest]
#[case::struct_type(Type::of::<MyStruct>())]
#[case::pointer_type(Type::of::<Option<MyStruct>>())]
#[case::boxed_type(Type::of::<Box<MyStruct>>())]
fn accepts_struct_types(#[case] ty: Type) -> Result<()> {
    let info = get_struct_info(ty)?;
    ensure!(info.fields().len() == 1);
    ensure!(info.ty() == Type::of::<MyStruct>());
    Ok(())
}

#[test]
fn accepts_struct_pointers() -> Result<()> {
    let value = Value::of(Some(MyStruct::default()));
    let info = get_struct_info(&value)?;
    ensure!(info.fields().len() == 1);
    Ok(())
}

#[test]
fn rejects_struct_values() -> Result<()> {
    let value = Value::of(MyStruct::default());
    let err = get_struct_info(&value)
        .err()
        .ok_or_else(|| anyhow!("struct values are not pointers"))?;
    expect_message(&err, &["struct pointer", "MyStruct"])
}

#[test]
fn rejects_non_struct_types() -> Result<()> {
    let err = get_struct_info(Type::of::<i64>())
        .err()
        .ok_or_else(|| anyhow!("i64 is not a struct"))?;
    expect_message(&err, &["can only get struct info from structs", "\"i64\""])
}

#[test]
fn describes_tags_and_field_types() -> Result<()> {
    let info = StructInfo::of::<Listing>()?;
    let a = info.field("a").ok_or_else(|| anyhow!("field a missing"))?;
    let pairs: Vec<_> = a.tags.iter().collect();
    ensure!(pairs == [("env", "A"), ("default", "1")], "got {pairs:?}");
    let nested = info.field("nested").ok_or_else(|| anyhow!("field nested missing"))?;
    ensure!(nested.kind == Kind::Ptr);
    ensure!(nested.ty.elem() == Some(Type::of::<MyStruct>()));
    Ok(())
}

#[test]
fn strategies_can_inspect_nested_fields() -> Result<()> {
    let decoder = decoder_fn(|field| {
        if field.tag("prefix").is_none() {
            return Ok(Decoded::value(1_i64));
        }
        let inner = get_struct_info(field.ty)?;
        let count = i64::try_from(inner.fields().len())?;
        Ok(Decoded::nested(decoder_fn(move |_| Ok(Decoded::value(count)))))
    });
    let mut target = Listing::default();
    decode(&mut target, &decoder)?;
    ensure!(target.a == 1);
    ensure!(target.nested.map(|nested| nested.a) == Some(1));
    Ok(())
}
