use md5::{Digest, Md5};
use uuid::Uuid;

/// Opaque 32-character hex token: MD5 of a random UUID plus a random integer.
pub fn generate() -> String {
    let seed = format!("{}{}", Uuid::new_v4(), rand::random::<u64>());
    hex::encode(Md5::digest(seed.as_bytes()))
}
