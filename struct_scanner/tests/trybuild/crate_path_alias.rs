use struct_scanner::{Decoded, Scan, decode, decoder_fn};

/// Verifies that `#[scan(crate = "struct_scanner")]` is accepted and the
/// generated code compiles. Uses the real crate name as a self-referential
/// alias so no workspace reconfiguration is needed.
#[derive(Debug, Default, Scan)]
#[scan(crate = "struct_scanner", rename = "Aliased")]
struct CratePathConfig {
    #[scan(tag = r#"env:"VALUE""#)]
    pub value: String,
    pub count: u32,
    hidden: bool,
}

fn main() {
    let mut target = CratePathConfig::default();
    let result = decode(&mut target, &decoder_fn(|_| Ok(Decoded::Skip)));
    let _: Result<(), struct_scanner::ScanError> = result;
    let _ = target.hidden;
}
