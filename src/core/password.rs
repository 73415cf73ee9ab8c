// ToolFusion - core/password.rs
//
// Password generation: uniform sampling from the union of the selected
// character classes. Pure service; clipboard writes live in platform/.

use crate::core::model::PasswordPolicy;
use crate::util::constants::MAX_PASSWORD_LENGTH;
use crate::util::error::PasswordError;
use rand::Rng;

/// Uppercase character class.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lowercase character class.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Digit character class.
pub const DIGITS: &str = "0123456789";

/// Symbol character class (ASCII punctuation).
pub const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Build the sampling pool for a policy. Empty when no class is selected.
fn char_pool(policy: &PasswordPolicy) -> Vec<char> {
    let mut pool = String::new();
    if policy.include_upper {
        pool.push_str(UPPERCASE);
    }
    if policy.include_lower {
        pool.push_str(LOWERCASE);
    }
    if policy.include_digits {
        pool.push_str(DIGITS);
    }
    if policy.include_symbols {
        pool.push_str(SYMBOLS);
    }
    pool.chars().collect()
}

/// Generate a password for the given policy.
///
/// Validates the policy first: a zero length or an empty character pool is
/// a configuration error and no password is produced. Each character is
/// drawn independently and uniformly from the pooled classes.
pub fn generate(policy: &PasswordPolicy) -> Result<String, PasswordError> {
    if policy.length == 0 {
        return Err(PasswordError::ZeroLength);
    }
    if policy.length > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::LengthTooLarge {
            length: policy.length,
            max: MAX_PASSWORD_LENGTH,
        });
    }

    let pool = char_pool(policy);
    if pool.is_empty() {
        return Err(PasswordError::EmptyPool);
    }

    let mut rng = rand::thread_rng();
    let password: String = (0..policy.length)
        .map(|_| pool[rng.gen_range(0..pool.len())])
        .collect();

    tracing::debug!(length = policy.length, pool = pool.len(), "Password generated");
    Ok(password)
}
