use anyhow::{Context, Result};
use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use pairpass::charset::{COMBINED, CharacterClass};
use pairpass::error::ValidationError;
use pairpass::generator::Derivation;
use pairpass::lcg::MODULUS;
use rpassword::read_password;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

pub const MIN_SECRET_CHARS: usize = 6;
pub const RECOMMENDED_SECRET_CHARS: usize = 12;
pub const MAX_SECRET_BYTES: usize = 1024 * 1024;

pub const MIN_LENGTH: usize = 16;
pub const MAX_LENGTH: usize = 64;
pub const DEFAULT_LENGTH: usize = 16;

pub const VALIDATION_MESSAGE: &str = "Both secrets must be at least 6 characters long.";

pub struct SecretInfo {
    pub index: usize,
    pub byte_length: usize,
    pub char_count: usize,
}

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn status_style(ok: bool, color_support: bool) -> Style {
    match (color_support, ok) {
        (false, _) => Style::new(),
        (true, true) => Style::new().green(),
        (true, false) => Style::new().yellow(),
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

/// Checks a secret against the caller-side minimum. The core never sees
/// secrets that fail here.
///
/// Length is counted in UTF-16 code units, the unit every previously
/// accepted secret was measured in.
pub fn validate_secret(secret: &str, index: usize) -> Result<(), ValidationError> {
    if secret.is_empty() {
        return Err(ValidationError::EmptySecret { index });
    }
    if secret.encode_utf16().count() < MIN_SECRET_CHARS {
        return Err(ValidationError::SecretTooShort {
            index,
            min: MIN_SECRET_CHARS,
        });
    }
    Ok(())
}

fn control_character_positions(s: &str) -> Vec<usize> {
    s.chars()
        .enumerate()
        .filter(|(_, c)| c.is_control())
        .map(|(pos, _)| pos)
        .collect()
}

fn confirm_control_characters(s: &str, input_name: &str) -> Result<()> {
    let positions = control_character_positions(s);
    if positions.is_empty() {
        return Ok(());
    }

    let term = Term::stderr();
    term.write_line(&format!(
        "WARNING: {} contains {} control character(s) at position(s): {}",
        input_name,
        positions.len(),
        positions
            .iter()
            .map(|pos| pos.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    ))?;
    term.write_str("Continue anyway? [y/N]: ")?;
    term.flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    let response = response.trim().to_lowercase();

    term.clear_last_lines(2)?;

    if response != "y" && response != "yes" {
        anyhow::bail!("Aborted");
    }
    Ok(())
}

/// Trim and NFC-normalise. Only applied with `--nfc`, since the raw
/// strings are what the derivation has always hashed.
pub fn normalize(s: &str) -> Zeroizing<String> {
    Zeroizing::new(s.trim().nfc().collect())
}

pub fn prompt_secret(index: usize, nfc: bool) -> Result<(Zeroizing<String>, SecretInfo)> {
    print!("In [{}]: ", index);
    io::stdout().flush()?;

    let raw = Zeroizing::new(
        read_password().with_context(|| format!("Failed to read secret {}", index))?,
    );

    let secret = if nfc { normalize(&raw) } else { raw };

    let byte_length = secret.len();
    if byte_length > MAX_SECRET_BYTES {
        anyhow::bail!(
            "Secret {} too long ({} bytes, maximum is {})",
            index,
            byte_length,
            MAX_SECRET_BYTES
        );
    }

    confirm_control_characters(&secret, &format!("Secret {}", index))?;

    let info = SecretInfo {
        index,
        byte_length,
        char_count: secret.chars().count(),
    };
    Ok((secret, info))
}

pub fn show_progress<F, T>(unicode_support: bool, f: F) -> Result<(T, Duration)>
where
    F: FnOnce() -> Result<T>,
{
    println!();

    let term = Term::stdout();
    term.hide_cursor().ok();

    let pb = ProgressBar::new_spinner();

    if unicode_support {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
    } else {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("-\\|/-"),
        );
    }

    pb.set_message("Deriving password...");
    pb.enable_steady_tick(Duration::from_millis(80));

    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();

    pb.finish_and_clear();
    term.show_cursor().ok();

    result.map(|r| (r, elapsed))
}

/// Upper bound from the alphabet alone; the 31-bit LCG state caps what
/// is actually reachable.
pub fn charset_entropy_bits(length: usize) -> f64 {
    length as f64 * (COMBINED.len() as f64).log2()
}

pub fn seed_space_bits() -> f64 {
    ((MODULUS - 1) as f64).log2()
}

pub fn display_output(
    derivation: &Derivation,
    secrets: &[SecretInfo],
    elapsed: Duration,
    options: &DisplayOptions,
) {
    if options.quiet {
        println!("{}", &*derivation.password);
        return;
    }

    println!("Out[0]:\n{}\n", &*derivation.password);
    display_settings(secrets, derivation, options);
    display_stats(derivation, elapsed, options);
}

fn display_settings(secrets: &[SecretInfo], derivation: &Derivation, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);

    println!("Settings:");
    println!("  ├─ Hash       SHA-256 (salt 64-bit, seed 32-bit)");
    println!("  ├─ PRNG       Park–Miller LCG (a=16807, m=2^31-1)");
    println!("  ├─ Secrets    {}", secrets.len());

    for (i, secret) in secrets.iter().enumerate() {
        let is_last = i == secrets.len() - 1;
        let prefix = if is_last { "│  └─" } else { "│  ├─" };
        let secure = secret.char_count >= RECOMMENDED_SECRET_CHARS;
        let style = status_style(secure, options.color_support);
        let status = if secure { check_ok } else { check_warn };

        println!(
            "  {} {} In [{}]: {} {} ({} {})",
            prefix,
            style.apply_to(format!("[{}]", status)),
            secret.index,
            style.apply_to(secret.byte_length),
            plural(secret.byte_length, "byte", "bytes"),
            style.apply_to(secret.char_count),
            plural(secret.char_count, "char", "chars"),
        );
    }

    println!(
        "  ├─ Sampling   {} per class, then combined alphabet",
        pairpass::generator::MIN_PER_CLASS
    );
    println!("  ├─ Shuffle    Fisher–Yates");
    println!(
        "  └─ Output     {} {}",
        derivation.requested_length,
        plural(derivation.requested_length, "char", "chars")
    );
    println!();
}

fn display_stats(derivation: &Derivation, elapsed: Duration, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);

    let length = derivation.produced_length();
    let length_secure = length >= MIN_LENGTH && !derivation.is_over_length();
    let length_style = status_style(length_secure, options.color_support);
    let length_status = if length_secure { check_ok } else { check_warn };

    let counts = derivation.class_counts();
    let classes = CharacterClass::ALL
        .iter()
        .zip(counts)
        .map(|(class, count)| format!("{}={}", class.name(), count))
        .collect::<Vec<_>>()
        .join(", ");

    let seed_style = status_style(false, options.color_support);

    println!("Stats:");
    println!(
        "  ├─ Length     {} {} {}",
        length_style.apply_to(format!("[{}]", length_status)),
        length_style.apply_to(length),
        plural(length, "char", "chars")
    );
    println!(
        "  ├─ Charset    {} chars ({:.1} bits max)",
        COMBINED.len(),
        charset_entropy_bits(length)
    );
    println!("  ├─ Classes    {}", classes);
    println!(
        "  ├─ Seed       {} {:.1} bits (deterministic, not a CSPRNG)",
        seed_style.apply_to(format!("[{}]", check_warn)),
        seed_space_bits()
    );
    println!("  └─ Time       {:.3}s", elapsed.as_secs_f64());
}
