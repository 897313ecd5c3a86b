use rand::Rng;

// url-safe alphabet, 64 symbols
const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

// IdGenerator produces opaque unique identifiers for new books
pub(crate) trait IdGenerator: Sync + Send {
    fn generate(&self) -> String;
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RandomIdGenerator {
    length: usize,
}

impl RandomIdGenerator {
    pub(crate) fn new(length: usize) -> Self {
        Self {
            length,
        }
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
