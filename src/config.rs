use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    terminal,
};

/// Trait for clients that read their API key from the environment.
pub trait KeyFromEnv {
    /// The environment variable name for this client's API key
    const KEY_NAME: &'static str;

    /// Find the API key by checking environment variables first, then .env file
    fn find_key() -> Option<String> {
        // Load .env if present; silently ignore when missing
        let _ = dotenvy::dotenv();

        env::var(Self::KEY_NAME).ok()
    }

    /// Find the API key with user fallback - waits 15 seconds for input then panics
    fn find_key_with_user() -> String {
        if let Some(key) = Self::find_key() {
            return key;
        }

        print!(
            "Environment variable {} not found. Please enter the API key (15 second timeout): ",
            Self::KEY_NAME
        );
        let _ = io::stdout().flush();

        let (sender, receiver) = std::sync::mpsc::channel();
        thread::spawn(move || {
            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_ok() {
                let _ = sender.send(input.trim().to_string());
            }
        });

        let api_key = match receiver.recv_timeout(Duration::from_secs(15)) {
            Ok(input) if !input.is_empty() => input,
            _ => panic!("Timeout waiting for {} input after 15 seconds", Self::KEY_NAME),
        };

        if Self::prompt_save_to_env() {
            if let Err(e) = Self::save_to_env_file(&api_key) {
                eprintln!("Warning: Failed to save to .env file: {}", e);
            } else {
                println!("API key saved to .env file");
            }
        }

        api_key
    }

    /// Ask whether to persist the key to .env, reading a single keystroke when possible
    fn prompt_save_to_env() -> bool {
        print!("Add {} to .env file? (y/N): ", Self::KEY_NAME);
        let _ = io::stdout().flush();

        if let Ok(response) = Self::read_single_key() {
            println!("{}", response);
            return response == "y";
        }

        // Fallback to readline
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_ok() {
            input.trim().eq_ignore_ascii_case("y")
        } else {
            false
        }
    }

    /// Attempt to read a single keystroke; anything other than 'y' means no
    fn read_single_key() -> Result<String, Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;

        let result = if event::poll(Duration::from_secs(30))? {
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                match code {
                    KeyCode::Char('y' | 'Y') => Ok("y".to_string()),
                    _ => Ok("n".to_string()),
                }
            } else {
                Ok("n".to_string())
            }
        } else {
            Ok("n".to_string())
        };

        terminal::disable_raw_mode()?;
        result
    }

    /// Append the key to .env unless an entry for it already exists
    fn save_to_env_file(api_key: &str) -> Result<(), Box<dyn std::error::Error>> {
        if let Ok(content) = std::fs::read_to_string(".env") {
            if content.contains(&format!("{}=", Self::KEY_NAME)) {
                return Ok(());
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(".env")?;
        file.write_all(format!("{}={}\n", Self::KEY_NAME, api_key).as_bytes())?;

        Ok(())
    }
}
