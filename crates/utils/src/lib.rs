use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                            abcdefghijklmnopqrstuvwxyz\
                            0123456789";

/// Random alphanumeric string, used as shared key when none is configured
pub fn create_random_secret(secret_len: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..secret_len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_creates_alphanumeric_secrets() {
        let sec1 = create_random_secret(32);
        let sec2 = create_random_secret(32);
        assert_eq!(sec1.len(), 32);
        assert_ne!(sec1, sec2);
        assert!(sec1.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(create_random_secret(0).is_empty());
    }
}
