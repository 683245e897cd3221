//! The `quizkit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizkit.toml").exists() {
        println!("quizkit.toml already exists, skipping.");
    } else {
        std::fs::write("quizkit.toml", SAMPLE_CONFIG)?;
        println!("Created quizkit.toml");
    }

    std::fs::create_dir_all("questions")?;
    let example_path = std::path::Path::new("questions/example.toml");
    if example_path.exists() {
        println!("questions/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTION)?;
        println!("Created questions/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point base_url in quizkit.toml at your quiz store");
    println!("  2. Run: quizkit validate-question --file questions/example.toml");
    println!("  3. Run: quizkit create-quiz --title \"My Quiz\" --description \"...\"");
    println!("  4. Run: quizkit add-question --quiz <ID> --file questions/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizkit configuration

base_url = "http://localhost:8000"
timeout_secs = 30

# Sent as a bearer token on admin requests.
# admin_token = "${QUIZKIT_ADMIN_TOKEN}"
"#;

const EXAMPLE_QUESTION: &str = r#"# type is one of MCQ_SINGLE, MCQ_MULTI, TRUE_FALSE, TEXT
type = "MCQ_MULTI"
text = "Which of these are Rust integer types?"
points = 2

[[choices]]
text = "u8"
is_correct = true

[[choices]]
text = "f32"
is_correct = false

[[choices]]
text = "i64"
is_correct = true
"#;
