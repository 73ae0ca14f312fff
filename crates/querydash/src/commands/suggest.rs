use crate::app::App;
use querydash_core::suggestions;

const RECENT_LIMIT: usize = 5;

pub fn run(input: Option<&str>) -> anyhow::Result<()> {
    let app = App::open()?;
    let history = app.history();
    print!("{}", render(input, &history.recent_texts(RECENT_LIMIT)));
    Ok(())
}

fn render(input: Option<&str>, recent: &[&str]) -> String {
    let mut out = String::new();

    match input.filter(|i| !i.trim().is_empty()) {
        Some(input) => {
            let needle = input.trim().to_lowercase();
            let matches = suggestions::filter(input);
            let recent: Vec<&str> = recent
                .iter()
                .copied()
                .filter(|t| t.to_lowercase().contains(&needle))
                .collect();

            if matches.is_empty() && recent.is_empty() {
                return format!("No suggestions for \"{}\"\n", input.trim());
            }
            for s in matches {
                out.push_str(&format!("  {} [{}]\n", s.text, s.category));
            }
            for text in recent {
                out.push_str(&format!("  {} [Recent]\n", text));
            }
        }
        None => {
            for (category, items) in suggestions::by_category() {
                out.push_str(&format!("{}\n", category));
                for s in items {
                    out.push_str(&format!("  {}\n", s.text));
                }
            }
            if !recent.is_empty() {
                out.push_str("Recent\n");
                for text in recent {
                    out.push_str(&format!("  {}\n", text));
                }
            }
        }
    }
    out
}
