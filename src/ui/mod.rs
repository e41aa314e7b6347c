//! Browser UI: a server-rendered snippet list.
//!
//! The page refreshes itself so it keeps tracking the store while the API
//! is being used from elsewhere.

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::Result;
use crate::model::Snippet;

const INDEX_TEMPLATE: &str = "index.html";
const REFRESH_SECONDS: u32 = 30;

#[derive(Serialize)]
struct Page<'a> {
    snippets: Vec<&'a Snippet>,
    favorites_only: bool,
    refresh_seconds: u32,
}

pub struct Ui {
    tera: Tera,
}

impl Ui {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX_TEMPLATE, include_str!("templates/index.html"))?;
        Ok(Ui { tera })
    }

    pub fn render(&self, snippets: &[Snippet], favorites_only: bool) -> Result<String> {
        let page = Page {
            snippets: snippets.iter().filter(|s| !favorites_only || s.favorite).collect(),
            favorites_only,
            refresh_seconds: REFRESH_SECONDS,
        };

        let context = Context::from_serialize(&page)?;
        Ok(self.tera.render(INDEX_TEMPLATE, &context)?)
    }
}
