//! Encapsulation scenario: addressing and per-layer options.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stepwise_trace::{Result, TraceError};

/// Longest message accepted, in bytes.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// A 48-bit hardware address written as six hex octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddr(pub [u8; 6]);

impl FromStr for MacAddr {
    type Err = TraceError;

    /// Accepts `aa:bb:cc:dd:ee:ff` or `aa-bb-cc-dd-ee-ff`.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || TraceError::InvalidInput(format!("'{}' is not a MAC address", s));
        let sep = if s.contains('-') { '-' } else { ':' };
        let mut octets = [0u8; 6];
        let mut parts = s.split(sep);
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(bad)?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(bad());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| bad())?;
        }
        if parts.next().is_some() {
            return Err(bad());
        }
        Ok(MacAddr(octets))
    }
}

impl TryFrom<String> for MacAddr {
    type Error = TraceError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<MacAddr> for String {
    fn from(mac: MacAddr) -> Self {
        mac.to_string()
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}", a, b, c, d, e, g)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    #[default]
    Tcp,
    Udp,
}

impl Transport {
    /// Payload bytes carried per segment or datagram.
    pub fn chunk_size(self) -> usize {
        match self {
            Transport::Tcp => 16,
            Transport::Udp => 32,
        }
    }

    /// Header bytes added per segment or datagram.
    pub fn header_len(self) -> usize {
        match self {
            Transport::Tcp => 20,
            Transport::Udp => 8,
        }
    }

    /// IPv4 protocol number.
    pub fn protocol_number(self) -> u8 {
        match self {
            Transport::Tcp => 6,
            Transport::Udp => 17,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Transport::Tcp => "TCP",
            Transport::Udp => "UDP",
        }
    }

    /// Number of chunks for `len` bytes; an empty payload still takes one.
    pub fn chunks(self, len: usize) -> usize {
        len.div_ceil(self.chunk_size()).max(1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    #[default]
    Stateful,
    Stateless,
}

/// Everything the pipeline needs besides the message itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Application protocol name, e.g. `HTTP`.
    pub application: String,
    pub source_ip: Ipv4Addr,
    pub destination_ip: Ipv4Addr,
    pub source_mac: MacAddr,
    pub destination_mac: MacAddr,
    pub source_port: u16,
    pub destination_port: u16,
    #[serde(default)]
    pub transport: Transport,
    #[serde(default)]
    pub compression: bool,
    #[serde(default)]
    pub encryption: bool,
    #[serde(default)]
    pub encryption_key: u8,
    #[serde(default)]
    pub session: SessionMode,
}

impl Default for Scenario {
    /// A browser on a home network fetching a web page.
    fn default() -> Self {
        Self {
            application: "HTTP".to_string(),
            source_ip: Ipv4Addr::new(192, 168, 1, 10),
            destination_ip: Ipv4Addr::new(93, 184, 216, 34),
            source_mac: MacAddr([0x3c, 0x22, 0xfb, 0x10, 0x4a, 0x01]),
            destination_mac: MacAddr([0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]),
            source_port: 49152,
            destination_port: 80,
            transport: Transport::Tcp,
            compression: false,
            encryption: false,
            encryption_key: 3,
            session: SessionMode::Stateful,
        }
    }
}

impl Scenario {
    /// Check everything the types themselves do not.
    pub fn validate(&self, message: &str) -> Result<()> {
        if self.application.trim().is_empty() {
            return Err(TraceError::invalid("application protocol name is empty"));
        }
        if self.source_port == 0 || self.destination_port == 0 {
            return Err(TraceError::InvalidInput(format!(
                "ports must be non-zero (got {} → {})",
                self.source_port, self.destination_port
            )));
        }
        if message.len() > MAX_MESSAGE_LEN {
            return Err(TraceError::InvalidInput(format!(
                "message of {} bytes exceeds the limit of {}",
                message.len(),
                MAX_MESSAGE_LEN
            )));
        }
        Ok(())
    }

    /// Session identifier derived from the conversation's endpoints.
    ///
    /// The same scenario always yields the same id.
    pub fn session_id(&self) -> [u8; 8] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.application.as_bytes());
        hasher.update(&self.source_ip.octets());
        hasher.update(&self.source_port.to_be_bytes());
        hasher.update(&self.destination_ip.octets());
        hasher.update(&self.destination_port.to_be_bytes());
        let hash = hasher.finalize();
        let mut id = [0u8; 8];
        id.copy_from_slice(&hash.as_bytes()[..8]);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_parses_both_separators() {
        let colon: MacAddr = "00:1A:2b:3c:4d:5e".parse().unwrap();
        let dash: MacAddr = "00-1a-2b-3c-4d-5e".parse().unwrap();
        assert_eq!(colon, dash);
        assert_eq!(colon.to_string(), "00:1a:2b:3c:4d:5e");
    }

    #[test]
    fn malformed_macs_are_rejected() {
        for bad in ["", "00:1a:2b:3c:4d", "00:1a:2b:3c:4d:5e:6f", "0:1a:2b:3c:4d:5e", "zz:1a:2b:3c:4d:5e", "+1:1a:2b:3c:4d:5e"] {
            assert!(bad.parse::<MacAddr>().is_err(), "{}", bad);
        }
    }

    #[test]
    fn scenario_deserializes_with_defaults() {
        let json = r#"{
            "application": "DNS",
            "source_ip": "10.0.0.2",
            "destination_ip": "8.8.8.8",
            "source_mac": "aa:bb:cc:dd:ee:ff",
            "destination_mac": "11:22:33:44:55:66",
            "source_port": 5353,
            "destination_port": 53
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.transport, Transport::Tcp);
        assert_eq!(scenario.session, SessionMode::Stateful);
        assert!(!scenario.encryption);
    }

    #[test]
    fn misspelled_field_is_rejected() {
        let mut json = serde_json::to_value(Scenario::default()).unwrap();
        json["encrypton"] = serde_json::json!(true);
        let err = serde_json::from_value::<Scenario>(json).unwrap_err();
        assert!(err.to_string().contains("encrypton"));
    }

    #[test]
    fn bad_ip_fails_deserialization() {
        let json = serde_json::json!({
            "application": "DNS",
            "source_ip": "10.0.0.300",
            "destination_ip": "8.8.8.8",
            "source_mac": "aa:bb:cc:dd:ee:ff",
            "destination_mac": "11:22:33:44:55:66",
            "source_port": 1,
            "destination_port": 53
        });
        assert!(serde_json::from_value::<Scenario>(json).is_err());
    }

    #[test]
    fn zero_port_and_long_message_are_rejected() {
        let mut scenario = Scenario::default();
        assert!(scenario.validate("hi").is_ok());
        assert!(scenario.validate(&"x".repeat(MAX_MESSAGE_LEN + 1)).is_err());
        scenario.destination_port = 0;
        assert!(scenario.validate("hi").unwrap_err().is_input_error());
    }

    #[test]
    fn chunk_math() {
        assert_eq!(Transport::Tcp.chunks(0), 1);
        assert_eq!(Transport::Tcp.chunks(16), 1);
        assert_eq!(Transport::Tcp.chunks(17), 2);
        assert_eq!(Transport::Udp.chunks(65), 3);
    }

    #[test]
    fn session_id_is_stable_per_endpoints() {
        let a = Scenario::default();
        let mut b = Scenario::default();
        assert_eq!(a.session_id(), b.session_id());
        b.source_port += 1;
        assert_ne!(a.session_id(), b.session_id());
    }
}
