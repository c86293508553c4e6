use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 1100px; padding: 1rem 2rem; }
header { border-bottom: 1px solid #ddd; margin-bottom: 1.5rem; }
form.upload { display: grid; gap: 0.75rem; grid-template-columns: 1fr 1fr; }
form.upload .wide { grid-column: span 2; }
label { display: flex; flex-direction: column; font-weight: 600; gap: 0.25rem; }
table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
th, td { border: 1px solid #ddd; padding: 0.4rem; text-align: left; vertical-align: top; }
th { background: #f4f4f4; }
.notice { padding: 0.75rem; border-radius: 4px; margin: 1rem 0; }
.notice.success { background: #d4edda; color: #155724; }
.notice.error { background: #f8d7da; color: #721c24; }
.downloads { display: flex; gap: 1rem; margin: 1rem 0; }
pre { white-space: pre-wrap; background: #f6f6f6; padding: 0.75rem; }
"#;

fn header() -> Markup {
    html! {
        header {
            h1 { a href="/" { "MCQ Generator" } }
        }
    }
}

pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                (header())
                main { (body) }
            }
        }
    }
}
