use struct_scanner::{Decoded, Scan, Type, decode, decoder_fn};

#[derive(Debug, Default, Scan)]
struct Wrapper<T>
where
    T: Clone,
{
    pub inner: T,
    pub items: Vec<T>,
    pub next: Option<Box<Wrapper<T>>>,
}

fn main() {
    let mut target = Wrapper::<u8>::default();
    let result = decode(&mut target, &decoder_fn(|field| {
        Ok(if field.kind.is_numeric() {
            Decoded::value(1_i64)
        } else {
            Decoded::Skip
        })
    }));
    let _: Result<(), struct_scanner::ScanError> = result;
    let _: Type = Type::of::<Wrapper<String>>();
}
