pub mod table;
pub mod json;

use crate::error::Result;
use crate::model::Snippet;

pub fn print_list(snippets: &[Snippet], json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", json::render(snippets)?);
    } else {
        print!("{}", table::render(snippets));
    }
    Ok(())
}

pub fn print_one(snippet: &Snippet, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", json::render(snippet)?);
    } else {
        print!("{}", table::render_detail(snippet));
    }
    Ok(())
}
