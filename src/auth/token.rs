use md5::{Digest, Md5};

pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

/// `x-client-token`: `"{ts},{md5 of the decimal digits of ts, reversed}"`.
///
/// The reversal is what the app does and the server checks for it.
pub fn client_token(timestamp_millis: u64) -> String {
    let reversed: String = timestamp_millis.to_string().chars().rev().collect();
    format!("{},{}", timestamp_millis, md5_hex(reversed.as_bytes()))
}
