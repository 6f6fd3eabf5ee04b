use std::fs;
use std::io;
use std::path::Path;

use crate::error::Result;
use crate::model::Catalog;

const DEFAULT_TEMPLATE: &str = include_str!("../templates/index_template.html");
const TITLE_PLACEHOLDER: &str = "__TEMPLATE_TITLE__";
const GRID_PLACEHOLDER: &str = "__TEMPLATE_MOVIE_GRID__";

/// Reads the page template, using the bundled one if `template_path`
/// does not exist.
pub fn load_template(template_path: &Path) -> Result<String> {
    match fs::read_to_string(template_path) {
        Ok(template) => Ok(template),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!(
                "Template {} not found, using the built-in one",
                template_path.display()
            );
            Ok(DEFAULT_TEMPLATE.to_string())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn render_page(template: &str, site_title: &str, movies: &Catalog) -> String {
    template
        .replace(TITLE_PLACEHOLDER, &escape_html(site_title))
        .replace(GRID_PLACEHOLDER, &render_movie_grid(movies))
}

fn render_movie_grid(movies: &Catalog) -> String {
    let mut grid = String::new();
    for (title, details) in movies {
        let title = escape_html(title);
        let notes = escape_html(&details.notes);

        grid.push_str("<div class=\"movie-item\">\n");
        grid.push_str(&format!("  <h2>{}</h2>\n", title));
        grid.push_str(&format!("  <p>Year: {}</p>\n", escape_html(&details.year)));
        grid.push_str(&format!("  <p>Rating: {}</p>\n", details.rating));
        grid.push_str(&format!(
            "  <a href=\"{}\" target=\"_blank\">\n",
            escape_html(&details.imdb_url)
        ));
        grid.push_str(&format!(
            "    <img src=\"{}\" alt=\"{} poster\" title=\"{}\">\n",
            escape_html(&details.poster),
            title,
            notes
        ));
        grid.push_str("  </a>\n");
        grid.push_str(&format!("  <div class=\"movie-note\">{}</div>\n", notes));
        grid.push_str("</div>\n");
    }
    grid
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders `movies` into `output_path`.
pub fn generate_website(
    movies: &Catalog,
    template_path: &Path,
    output_path: &Path,
    site_title: &str,
) -> Result<()> {
    let template = load_template(template_path)?;
    fs::write(output_path, render_page(&template, site_title, movies))?;
    log::info!("Website written to {}", output_path.display());
    Ok(())
}
