//! Packet traces and hex dumps written to a text sink.
use csp_can_link::infra::{
    codec::hex::parse_hex_payload,
    diag::{packet_dump, Diagnostics, PacketId},
};

#[test]
/// Ten bytes: a full row, then two bytes padded to the same hex width.
fn test_dump_of_ten_bytes() {
    let mut out = String::new();
    packet_dump(&mut out, b"ABCDEFGH\x01\x7f").unwrap();

    let expected = concat!(
        "0x41 0x42 0x43 0x44 0x45 0x46 0x47 0x48    ABCDEFGH\n",
        "0x01 0x7F                                  ..\n",
    );
    assert_eq!(out, expected);

    let rows: Vec<&str> = out.lines().collect();
    assert_eq!(rows.len(), 2);
    // Both ASCII columns start at the same offset.
    assert_eq!(rows[0].find("ABC"), Some(43));
    assert_eq!(rows[1].find(".."), Some(43));
}

#[test]
fn test_dump_of_empty_payload() {
    let mut out = String::new();
    packet_dump(&mut out, &[]).unwrap();
    assert!(out.is_empty());
}

#[test]
/// A packet without payload traces its header line and no dump rows.
fn test_trace_of_empty_packet() {
    let mut diag = Diagnostics::new(String::new());
    diag.input_hook("CAN1", &PacketId::default(), &[]);

    let trace = diag.into_inner();
    assert_eq!(trace.lines().count(), 1);
    assert!(trace.ends_with("Sz 0 VIA: CAN1\n"));
}

#[test]
/// Printable range is 32..=126; the space is printable, DEL is not.
fn test_dump_ascii_column() {
    let mut out = String::new();
    packet_dump(&mut out, &[b' ', b'~', 0x7F, 0x00, 0xFF]).unwrap();
    assert!(out.ends_with("    ~...\n"));
}

#[test]
/// Inbound trace line followed by the payload dump.
fn test_input_hook_line() {
    let mut diag = Diagnostics::new(String::new());
    let id = PacketId {
        src: 2,
        dst: 10,
        dport: 1,
        sport: 40,
        pri: 2,
        flags: 0x01,
    };
    diag.input_hook("CAN1", &id, b"hi");

    let out = diag.into_inner();
    let mut lines = out.lines();
    assert_eq!(
        lines.next(),
        Some("INP: S 2, D 10, Dp 1, Sp 40, Pr 2, Fl 0x01, Sz 2 VIA: CAN1")
    );
    assert!(lines.next().is_some_and(|row| row.starts_with("0x68 0x69 ")));
    assert_eq!(lines.next(), None);
}

#[test]
/// Without a next hop the destination is shown as the via address.
fn test_output_hook_via() {
    let mut diag = Diagnostics::new(String::new());
    let id = PacketId {
        src: 10,
        dst: 2,
        dport: 40,
        sport: 1,
        pri: 2,
        flags: 0,
    };
    diag.output_hook("CAN1", &id, &[], None);
    diag.output_hook("CAN1", &id, &[], Some(5));

    let out = diag.into_inner();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "OUT: S 10, D 2, Dp 40, Sp 1, Pr 2, Fl 0x00, Sz 0 VIA: CAN1 (2)",
            "OUT: S 10, D 2, Dp 40, Sp 1, Pr 2, Fl 0x00, Sz 0 VIA: CAN1 (5)",
        ]
    );
}

#[test]
/// Operator payloads: invalid tokens skipped, case ignored.
fn test_parse_hex_payload() {
    let mut buf = [0u8; 8];
    let len = parse_hex_payload("01 02 ff GG 0a", &mut buf);
    assert_eq!(&buf[..len], &[0x01, 0x02, 0xFF, 0x0A]);
}
