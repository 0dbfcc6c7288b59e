//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Async code in the TUI and the companion core MUST NOT block.
//! Both run on one current-thread runtime; a blocking call inside an
//! `async fn` stalls streaming and input together.
//! **Required**: Use `tokio::fs`, `tokio::net`, `tokio::process`, async
//! `reqwest`, not their `std` or blocking counterparts.

use architectural_enforcement::{find_blocking_io_violations, workspace_root, PRODUCTION_DIRS};

/// Test that async production code does not use blocking I/O
#[test]
fn test_no_blocking_io_in_async_code() {
    let violations = find_blocking_io_violations();

    if !violations.is_empty() {
        eprintln!("\nBlocking I/O calls found in async production code!\n");

        for violation in &violations {
            eprintln!("  {violation}");
        }

        eprintln!("\nFORBIDDEN inside async fn:");
        eprintln!("  - std::fs::read(), std::fs::write(), std::fs::File");
        eprintln!("  - std::net::TcpStream, std::net::TcpListener");
        eprintln!("  - std::process::Command");
        eprintln!("  - reqwest::blocking::*");
        eprintln!("  - std::thread::sleep");
        eprintln!("\nACCEPTABLE blocking I/O:");
        eprintln!("  - Non-async functions (config loading before the runtime starts)");
        eprintln!("  - Test code");

        panic!(
            "\nFound {} blocking I/O violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// The scan must actually see the sources it guards
#[test]
fn test_production_dirs_exist() {
    let root = workspace_root();
    for dir in PRODUCTION_DIRS {
        assert!(
            root.join(dir).is_dir(),
            "missing production directory: {dir}"
        );
    }
}
