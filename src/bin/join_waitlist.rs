// Utility to join the waitlist of a running instance from the command line

use std::{env, process};

use url::Url;

use aimaker_waitlist::client::WaitlistClient;
use aimaker_waitlist::form::{FormStatus, SignupForm};

/// Drive the signup form against a live server
#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg.starts_with('-')) {
        usage(&args[0]);
    }
    if args.len() != 3 {
        usage(&args[0]);
    }

    let base_url = Url::parse(&args[1]).unwrap_or_else(|e| {
        eprintln!("Invalid base URL `{}`: {e}", args[1]);
        process::exit(1);
    });
    let client = WaitlistClient::new(base_url);

    // Walk the form through the same steps the landing page takes
    let mut form = SignupForm::new();
    form.mount(&client).await;
    match form.waitlist_count() {
        Some(count) => println!("Signups so far: {count}"),
        None => println!("Signups so far: unknown"),
    }

    form.input_changed(args[2].clone());
    form.submit(&client).await;

    match form.status() {
        FormStatus::Success => {
            println!("{}", form.message());
            if let Some(count) = form.waitlist_count() {
                println!("Signups now: {count}");
            }
        }
        _ => {
            eprintln!("{}", form.message());
            process::exit(1);
        }
    }
}

/// Print usage information and exit
fn usage(prog: &str) -> ! {
    println!("Usage:");
    println!("{prog} <base-url> <email>");
    println!("\nExamples:");
    println!("{prog} http://127.0.0.1:8000 ada@example.com");

    process::exit(1);
}
