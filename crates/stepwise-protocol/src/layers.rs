//! The seven-layer pipeline.

use serde::{Deserialize, Serialize};
use stepwise_trace::{Result, Trace, TraceBuilder};

use crate::codec::{bit_preview, compress, crc32, encrypt, hex_preview};
use crate::scenario::{Scenario, SessionMode, Transport};

/// Session header bytes: the 8-byte session id.
pub const SESSION_HEADER_LEN: usize = 8;

/// IPv4 header bytes per packet (no options).
pub const IPV4_HEADER_LEN: usize = 20;

/// Ethernet header bytes per frame.
pub const ETHERNET_HEADER_LEN: usize = 14;

/// Ethernet FCS trailer bytes per frame.
pub const ETHERNET_TRAILER_LEN: usize = 4;

/// Time-to-live stamped on every packet.
pub const DEFAULT_TTL: u8 = 64;

/// What one layer did to the data unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerRecord {
    /// OSI layer number, 7 (application) down to 1 (physical).
    pub number: u8,
    pub name: String,
    pub protocol: String,
    pub transformation: String,
    pub header: Option<String>,
    pub trailer: Option<String>,
    pub payload_preview: String,
    /// Total bytes on the wire at this layer, headers included.
    pub byte_len: usize,
    pub notes: Vec<String>,
}

/// Layers processed so far, top-down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncapsulationState {
    pub layers: Vec<LayerRecord>,
}

impl EncapsulationState {
    pub fn current(&self) -> Option<&LayerRecord> {
        self.layers.last()
    }
}

struct Pipeline {
    state: EncapsulationState,
    builder: TraceBuilder<EncapsulationState>,
}

impl Pipeline {
    fn emit(&mut self, record: LayerRecord) {
        let title = format!("Layer {}: {}", record.number, record.name);
        let description = format!("{} ({} bytes)", record.transformation, record.byte_len);
        self.state.layers.push(record);
        self.builder.snapshot(title, description, &self.state);
    }
}

/// Encapsulate `message` top-down through all seven layers.
///
/// Exactly one frame per layer; each frame carries every record produced so
/// far.
pub fn encapsulate(scenario: &Scenario, message: &str) -> Result<Trace<EncapsulationState>> {
    scenario.validate(message)?;

    let mut p = Pipeline {
        state: EncapsulationState::default(),
        builder: TraceBuilder::new("encapsulation"),
    };
    let raw = message.as_bytes();

    p.emit(LayerRecord {
        number: 7,
        name: "Application".into(),
        protocol: scenario.application.clone(),
        transformation: "Message handed down as raw bytes".into(),
        header: None,
        trailer: None,
        payload_preview: hex_preview(raw),
        byte_len: raw.len(),
        notes: vec![format!("Text: {:?}", message)],
    });

    // Presentation
    let mut data = raw.to_vec();
    let mut steps = Vec::new();
    let mut notes = Vec::new();
    if scenario.compression {
        let before = data.len();
        data = compress(&data);
        steps.push("compressed");
        notes.push(format!("Pairwise averaging: {} → {} bytes", before, data.len()));
    }
    if scenario.encryption {
        data = encrypt(&data, scenario.encryption_key);
        steps.push("encrypted");
        notes.push(format!(
            "Byte i shifted by key {} + i (mod 256)",
            scenario.encryption_key
        ));
    }
    let transformation = if steps.is_empty() {
        "Passed through unchanged".to_string()
    } else {
        let mut t = steps.join(" then ");
        t[..1].make_ascii_uppercase();
        t
    };
    p.emit(LayerRecord {
        number: 6,
        name: "Presentation".into(),
        protocol: match (scenario.compression, scenario.encryption) {
            (false, false) => "None",
            (true, false) => "Compression",
            (false, true) => "Encryption",
            (true, true) => "Compression + Encryption",
        }
        .into(),
        transformation,
        header: None,
        trailer: None,
        payload_preview: hex_preview(&data),
        byte_len: data.len(),
        notes,
    });

    // Session
    let (header, session_len, transformation, note) = match scenario.session {
        SessionMode::Stateful => {
            let id = hex::encode(scenario.session_id());
            (
                Some(format!("SESSION id={} seq=0", id)),
                SESSION_HEADER_LEN,
                "Session header added".to_string(),
                format!("Conversation state kept under session {}", id),
            )
        }
        SessionMode::Stateless => (
            None,
            0,
            "No session framing".to_string(),
            "Each message stands alone; no state is kept".to_string(),
        ),
    };
    let session_bytes = data.len() + session_len;
    p.emit(LayerRecord {
        number: 5,
        name: "Session".into(),
        protocol: match scenario.session {
            SessionMode::Stateful => "Stateful",
            SessionMode::Stateless => "Stateless",
        }
        .into(),
        transformation,
        header,
        trailer: None,
        payload_preview: hex_preview(&data),
        byte_len: session_bytes,
        notes: vec![note],
    });

    // Transport
    let transport = scenario.transport;
    let chunks = transport.chunks(session_bytes);
    let size = transport.chunk_size();
    let unit = match transport {
        Transport::Tcp => "segment",
        Transport::Udp => "datagram",
    };
    let transport_bytes = session_bytes + chunks * transport.header_len();
    let mut notes: Vec<String> = (0..chunks)
        .map(|i| {
            let start = i * size;
            let len = session_bytes.saturating_sub(start).min(size);
            format!("{} {}: {} payload bytes", unit, i + 1, len)
        })
        .collect();
    notes.push(format!(
        "{} × {}-byte header",
        chunks,
        transport.header_len()
    ));
    p.emit(LayerRecord {
        number: 4,
        name: "Transport".into(),
        protocol: transport.name().into(),
        transformation: format!(
            "Split into {} {}{} of up to {} bytes",
            chunks,
            unit,
            if chunks == 1 { "" } else { "s" },
            size
        ),
        header: Some(format!(
            "{} src_port={} dst_port={}",
            transport.name(),
            scenario.source_port,
            scenario.destination_port
        )),
        trailer: None,
        payload_preview: hex_preview(&data),
        byte_len: transport_bytes,
        notes,
    });

    // Network
    let network_bytes = transport_bytes + chunks * IPV4_HEADER_LEN;
    p.emit(LayerRecord {
        number: 3,
        name: "Network".into(),
        protocol: "IPv4".into(),
        transformation: format!("{} packet(s) addressed and routed", chunks),
        header: Some(format!(
            "IPv4 src={} dst={} ttl={} proto={}",
            scenario.source_ip,
            scenario.destination_ip,
            DEFAULT_TTL,
            transport.protocol_number()
        )),
        trailer: None,
        payload_preview: hex_preview(&data),
        byte_len: network_bytes,
        notes: vec![format!("{} × {}-byte header", chunks, IPV4_HEADER_LEN)],
    });

    // Data link
    let link_bytes = network_bytes + chunks * (ETHERNET_HEADER_LEN + ETHERNET_TRAILER_LEN);
    let fcs = crc32(&data);
    p.emit(LayerRecord {
        number: 2,
        name: "Data Link".into(),
        protocol: "Ethernet".into(),
        transformation: format!("{} frame(s) with header and FCS", chunks),
        header: Some(format!(
            "ETH src={} dst={} type=0x0800",
            scenario.source_mac, scenario.destination_mac
        )),
        trailer: Some(format!("FCS=0x{:08x}", fcs)),
        payload_preview: hex_preview(&data),
        byte_len: link_bytes,
        notes: vec![format!(
            "{} × ({}-byte header + {}-byte trailer)",
            chunks, ETHERNET_HEADER_LEN, ETHERNET_TRAILER_LEN
        )],
    });

    // Physical
    p.emit(LayerRecord {
        number: 1,
        name: "Physical".into(),
        protocol: "Bit stream".into(),
        transformation: format!("{} bits put on the wire", link_bytes * 8),
        header: None,
        trailer: None,
        payload_preview: bit_preview(&data),
        byte_len: link_bytes,
        notes: vec![format!("{} bytes = {} bits", link_bytes, link_bytes * 8)],
    });

    tracing::debug!(
        application = %scenario.application,
        message_len = raw.len(),
        wire_len = link_bytes,
        "message encapsulated"
    );
    p.builder.finish()
}
