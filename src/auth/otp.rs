use rand::{rngs::OsRng, Rng};

/// Generate a 4-digit one-time code, uniform over [1000, 9999].
pub fn generate_otp() -> String {
    OsRng.gen_range(1000..=9999u32).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_four_digits_in_range() {
        for _ in 0..1000 {
            let code = generate_otp();
            assert_eq!(code.len(), 4);
            let n: u32 = code.parse().expect("numeric code");
            assert!((1000..=9999).contains(&n));
        }
    }
}
