/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Encode and decode a 0200 purchase request.
//!
//! Run with: `cargo run --example purchase_request`

use iron8583::codec::{Decoder, Encoder};
use iron8583::core::{FieldNumber, FieldValue, Message, Mti};
use iron8583::dictionary::{resolve_schema, FieldDecl};
use iron8583::Result;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    // A small acquirer-side layout: PAN, processing code, amount, STAN,
    // terminal id, and an EMV data envelope.
    let decls = vec![
        FieldDecl::variable(2, "numeric", "ll").with_max_length(19),
        FieldDecl::fixed(3, "numeric", 6),
        FieldDecl::fixed(4, "numeric", 12),
        FieldDecl::fixed(11, "numeric", 6),
        FieldDecl::fixed(41, "alphanum", 8),
        FieldDecl::variable(55, "binary", "lll").with_max_length(255),
    ];
    let schema = resolve_schema(&decls)?;

    let mut request = Message::new(Mti::new("0200")?);
    request.set(field(2), FieldValue::ll_numeric("4242424242424242"));
    request.set(field(3), FieldValue::numeric("000000"));
    request.set(field(4), FieldValue::numeric("000000012500"));
    request.set(field(11), FieldValue::numeric("000042"));
    request.set(field(41), FieldValue::alphanumeric("TERM0001"));
    request.set(field(55), FieldValue::lll_var(&b"\x9f\x02\x06\x00\x00\x00\x01\x25\x00"[..]));

    let wire = Encoder::new(&schema).encode(&request)?;
    println!("encoded {} bytes: {}", wire.len(), hex(&wire));

    let decoded = Decoder::new(&schema).decode(&wire)?;
    assert_eq!(decoded, request);
    println!(
        "decoded MTI {} with {} fields",
        decoded.mti(),
        decoded.field_count()
    );
    for (number, value) in decoded.fields() {
        println!("  field {:>3}: {}", number, value);
    }
    Ok(())
}

fn field(n: u8) -> FieldNumber {
    FieldNumber::new(n).expect("field number in range")
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
