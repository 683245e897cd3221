//! The `quizkit slug` command.

use anyhow::Result;

use quizkit_core::form::slugify;

pub fn execute(title: String) -> Result<()> {
    let slug = slugify(&title);
    anyhow::ensure!(!slug.is_empty(), "title has no characters usable in a slug");
    println!("{slug}");
    Ok(())
}
