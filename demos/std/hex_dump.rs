//! # Hex Dump Example
//!
//! Host-side helper mirroring what an operator does when injecting raw
//! bytes towards a node: parse a hex string, then show the packet trace the
//! node would print for it.
//!
//! ```bash
//! cargo run --example hex_dump -- "01 02 03 04 48 69 21 ff 0a 0b"
//! ```

use csp_can_link::infra::{
    codec::hex::parse_hex_payload,
    diag::{Diagnostics, PacketId},
};

fn main() {
    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("01 02 03 04 48 69 21 ff 0a 0b"));

    let mut buffer = [0u8; 256];
    let len = parse_hex_payload(&text, &mut buffer);
    println!("Parsed {} bytes from \"{}\"\n", len, text);

    let id = PacketId {
        src: 10,
        dst: 2,
        dport: 29,
        sport: 40,
        pri: 2,
        flags: 0,
    };

    let mut diag = Diagnostics::new(String::new());
    diag.output_hook("CAN1", &id, &buffer[..len], None);
    print!("{}", diag.into_inner());
}
