mod encoding;

pub use encoding::{decode_base64, encode_base64};
