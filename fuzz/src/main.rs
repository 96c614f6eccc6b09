use leptjson::parser::Parser;

#[macro_use]
extern crate afl;

fn main() {
    fuzz!(|data: &[u8]| {
        // Parsing must never panic, only return a ParseError.
        let _ = Parser::new(data).parse();
    });
}
