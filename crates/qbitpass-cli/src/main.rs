//! qbitpass — qBittorrent password hash generator/verifier
//!
//! # Usage
//!
//! ```bash
//! qbitpass generate <password>          # print base64(salt):base64(key)
//! qbitpass verify <secret> <password>   # print OK or FAIL
//! ```
//!
//! `verify` always exits 0; the result is the printed `OK`/`FAIL`, not the
//! exit code. Only usage errors (and an entropy-source failure during
//! `generate`) exit non-zero.

use anyhow::{bail, Context, Result};

fn main() -> Result<()> {
    // Security hardening: disable core dumps before any password handling
    qbitpass_core::memory::disable_core_dumps();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("generate") => {
            let [password] = expect_args(&args[2..], &["<password>"])?;
            log::debug!("deriving credential ({} iterations)", qbitpass_core::credential::ITERATIONS);
            let record = qbitpass_core::derive(password)
                .context("Failed to derive credential")?;
            println!("{record}");
        }
        Some("verify") => {
            let [secret, password] = expect_args(&args[2..], &["<secret>", "<password>"])?;
            if qbitpass_core::verify(secret, password) {
                println!("OK");
            } else {
                println!("FAIL");
            }
        }
        Some("--help" | "-h") => print_help(),
        Some("--version" | "-V") => println!("qbitpass {}", env!("CARGO_PKG_VERSION")),
        Some(other) => bail!("Unknown subcommand: {other} (try --help)"),
        None => bail!("Missing subcommand (try --help)"),
    }

    Ok(())
}

/// Check that a subcommand received exactly `N` positional arguments.
fn expect_args<'a, const N: usize>(rest: &'a [String], names: &[&str; N]) -> Result<[&'a str; N]> {
    if rest.len() != N {
        bail!(
            "Expected exactly {} argument(s): {}",
            N,
            names.join(" ")
        );
    }
    let mut out = [""; N];
    for (slot, arg) in out.iter_mut().zip(rest) {
        *slot = arg.as_str();
    }
    Ok(out)
}

fn print_help() {
    println!(
        r#"qbitpass — qBittorrent PBKDF2-HMAC-SHA512 password hash tool

USAGE:
    qbitpass generate <password>
    qbitpass verify <secret> <password>

SUBCOMMANDS:
    generate    Derive a hash for a password and print it
    verify      Check a password against a stored hash; prints OK or FAIL

OPTIONS:
    -h, --help       Show this help message
    -V, --version    Show version

The hash format is "base64(salt):base64(derived_key)" — a 16-byte random
salt and a 64-byte PBKDF2-HMAC-SHA512 key with 100000 iterations, suitable
for qBittorrent's WebUI\Password_PBKDF2 setting.

EXAMPLES:
    # Generate a hash
    qbitpass generate 'hunter2'

    # Verify (prints OK or FAIL; exit code stays 0 either way)
    qbitpass verify 'q2m1...==:iacy...==' 'hunter2'

Set RUST_LOG=debug for diagnostics.
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_expect_args_exact() {
        let rest = strings(&["secret", "password"]);
        let [a, b] = expect_args(&rest, &["<secret>", "<password>"]).unwrap();
        assert_eq!(a, "secret");
        assert_eq!(b, "password");
    }

    #[test]
    fn test_expect_args_arity_errors() {
        let too_few = strings(&["only-one"]);
        assert!(expect_args::<2>(&too_few, &["<secret>", "<password>"]).is_err());

        let too_many = strings(&["a", "b"]);
        assert!(expect_args::<1>(&too_many, &["<password>"]).is_err());
    }
}
