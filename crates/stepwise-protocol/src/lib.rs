//! Stepwise Protocol Encapsulation
//!
//! Follows a message down the seven OSI layers. Every layer yields exactly one
//! frame regardless of message size, and the byte arithmetic is exact:
//!
//! | Layer | Adds |
//! |---|---|
//! | Presentation | compression to `ceil(n / 2)` bytes, positional encryption |
//! | Session | 8-byte session header when stateful |
//! | Transport | 20-byte TCP header per 16-byte segment, 8-byte UDP header per 32-byte datagram |
//! | Network | 20-byte IPv4 header per packet |
//! | Data link | 14-byte Ethernet header and 4-byte CRC-32 trailer per frame |

mod codec;
mod layers;
mod scenario;

pub use codec::{bit_preview, compress, crc32, decrypt, encrypt, hex_preview};
pub use layers::{
    encapsulate, EncapsulationState, LayerRecord, DEFAULT_TTL, ETHERNET_HEADER_LEN,
    ETHERNET_TRAILER_LEN, IPV4_HEADER_LEN, SESSION_HEADER_LEN,
};
pub use scenario::{MacAddr, Scenario, SessionMode, Transport, MAX_MESSAGE_LEN};
