//! Human-readable diagnostics: one trace line per routed packet and a
//! fixed-width hex/ASCII dump of its payload.
//!
//! The sink is any [`core::fmt::Write`] (a UART adapter on target, a
//! `String` on the host). Output is best-effort: write errors are dropped so
//! that a slow or broken console never stalls routing.
use core::fmt::Write;

/// Bytes per hex-dump row.
pub const DUMP_ROW_BYTES: usize = 8;

/// Header fields of a routed packet as shown in traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PacketId {
    pub src: u16,
    pub dst: u16,
    pub dport: u8,
    pub sport: u8,
    pub pri: u8,
    pub flags: u8,
}

/// Write a hex/ASCII dump of `data`, eight bytes per row.
///
/// Each byte takes five characters (`0xAB `) in the hex column; missing
/// bytes of the last row are padded with spaces so the ASCII column stays
/// aligned. The ASCII column shows printable characters (32..=126) and `.`
/// for anything else, and only covers the bytes actually present.
/// An empty payload writes nothing, not even a newline.
pub fn packet_dump<W: Write>(out: &mut W, data: &[u8]) -> core::fmt::Result {
    for row in data.chunks(DUMP_ROW_BYTES) {
        for byte in row {
            write!(out, "0x{:02X} ", byte)?;
        }
        for _ in row.len()..DUMP_ROW_BYTES {
            out.write_str("     ")?;
        }

        out.write_str("   ")?;

        for &byte in row {
            let shown = if (32..=126).contains(&byte) {
                byte as char
            } else {
                '.'
            };
            out.write_char(shown)?;
        }
        out.write_char('\n')?;
    }
    Ok(())
}

//==================================================================================DIAGNOSTICS
/// Packet tracer bound to a text sink. Call the hooks from the stack's
/// input and output paths.
pub struct Diagnostics<W: Write> {
    out: W,
}

impl<W: Write> Diagnostics<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Trace a packet entering the router from `iface`.
    pub fn input_hook(&mut self, iface: &str, id: &PacketId, payload: &[u8]) {
        let _ = writeln!(
            self.out,
            "INP: S {}, D {}, Dp {}, Sp {}, Pr {}, Fl 0x{:02X}, Sz {} VIA: {}",
            id.src,
            id.dst,
            id.dport,
            id.sport,
            id.pri,
            id.flags,
            payload.len(),
            iface
        );
        let _ = packet_dump(&mut self.out, payload);
    }

    /// Trace a packet leaving through `iface`. Without a next hop the
    /// destination itself is shown as the via address.
    pub fn output_hook(&mut self, iface: &str, id: &PacketId, payload: &[u8], via: Option<u16>) {
        let _ = writeln!(
            self.out,
            "OUT: S {}, D {}, Dp {}, Sp {}, Pr {}, Fl 0x{:02X}, Sz {} VIA: {} ({})",
            id.src,
            id.dst,
            id.dport,
            id.sport,
            id.pri,
            id.flags,
            payload.len(),
            iface,
            via.unwrap_or(id.dst)
        );
        let _ = packet_dump(&mut self.out, payload);
    }

    /// Access the underlying sink.
    pub fn sink(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
