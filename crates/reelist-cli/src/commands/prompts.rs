use color_eyre::Result;
use dialoguer::{Input, Password};

/// Prompt for a free-text value.
pub fn prompt_string(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input).
pub fn prompt_secret(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read secret: {}", e))
}

/// Prompt for a star rating until the answer is an integer in 1..=10.
pub fn prompt_rating(prompt: &str) -> Result<u8> {
    loop {
        let raw = Input::<String>::new()
            .with_prompt(format!("{} (1-10)", prompt))
            .interact()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read rating: {}", e))?;

        match raw.trim().parse::<u8>() {
            Ok(value) if (1..=10).contains(&value) => return Ok(value),
            _ => eprintln!("Please enter a whole number between 1 and 10"),
        }
    }
}
