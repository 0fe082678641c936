//! Markdown rendering for manuals.

use crate::error::Result;
use crate::model::{BomContent, ContentModule, ModuleContent, ModuleType};

use super::{pick, ManualView, RenderOptions};

/// Convert a manual view to Markdown.
pub fn to_markdown(view: &ManualView, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(view)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a manual view to Markdown.
    pub fn render(&self, view: &ManualView) -> Result<String> {
        let mut output = String::new();

        if self.options.include_metadata {
            self.render_metadata(&mut output, view);
        }

        for node in view.tree.linearize() {
            let section = node.section;
            let overlay = view
                .translations
                .as_ref()
                .and_then(|set| set.sections.get(&section.id));

            let title = self
                .options
                .title_overrides
                .get(&section.id)
                .map(String::as_str)
                .or_else(|| {
                    pick(
                        overlay.map(|tr| tr.title.as_str()),
                        Some(section.title.as_str()),
                    )
                })
                .unwrap_or_default();

            let level = node.heading_level(self.options.max_heading_level);
            output.push_str(&"#".repeat(level as usize));
            output.push(' ');
            output.push_str(title);
            output.push_str("\n\n");

            if let Some(description) = pick(
                overlay.and_then(|tr| tr.description.as_deref()),
                section.description.as_deref(),
            ) {
                output.push_str(description);
                output.push_str("\n\n");
            }

            for module in view.section_modules(section.id) {
                self.render_module(&mut output, view, module);
            }
        }

        Ok(output.trim().to_string())
    }

    fn render_metadata(&self, output: &mut String, view: &ManualView) {
        let doc = &view.document;
        output.push_str("---\n");
        output.push_str(&format!("title: \"{}\"\n", escape_yaml(&doc.title)));
        if let Some(version) = &doc.version {
            output.push_str(&format!("version: \"{}\"\n", escape_yaml(version)));
        }
        output.push_str(&format!("status: {}\n", doc.status.as_str()));
        output.push_str("---\n\n");
    }

    fn render_module(&self, output: &mut String, view: &ManualView, module: &ContentModule) {
        let overlay = view.module_overlay(module.id);

        match &module.kind {
            ModuleType::Text | ModuleType::Testp => {
                let source = module.content.as_text().and_then(|c| c.text.as_deref());
                let translated = overlay
                    .and_then(ModuleContent::as_text)
                    .and_then(|c| c.text.as_deref());
                if let Some(text) = pick(translated, source) {
                    output.push_str(text);
                    output.push_str("\n\n");
                }
            }

            ModuleType::Image | ModuleType::Video => {
                self.render_media(output, module, overlay);
            }

            ModuleType::Table => {
                self.render_table(output, module, overlay);
            }

            kind if kind.is_alert() => {
                self.render_alert(output, kind, module, overlay);
            }

            ModuleType::Checklist => {
                self.render_checklist(output, module, overlay);
            }

            ModuleType::Bom => {
                self.render_bom(output, view, module, overlay);
            }

            ModuleType::Link => {
                let source = module.content.as_link();
                let translated = overlay.and_then(ModuleContent::as_link);
                let url = source.and_then(|c| c.url.as_deref()).unwrap_or("#");
                let text = pick(
                    translated.and_then(|c| c.text.as_deref()),
                    source.and_then(|c| c.text.as_deref()),
                )
                .unwrap_or(url);
                output.push_str(&format!("[{text}]({url})"));
                if let Some(description) = pick(
                    translated.and_then(|c| c.description.as_deref()),
                    source.and_then(|c| c.description.as_deref()),
                ) {
                    output.push_str(&format!(" - {description}"));
                }
                output.push_str("\n\n");
            }

            kind if kind.is_attachment() => {
                let source = module.content.as_attachment();
                let translated = overlay.and_then(ModuleContent::as_attachment);
                let src = source.and_then(|c| c.src.as_deref()).unwrap_or("#");
                let label = pick(
                    translated.and_then(|c| c.title.as_deref()),
                    source.and_then(|c| c.title.as_deref()),
                )
                .or_else(|| source.and_then(|c| c.filename.as_deref()))
                .unwrap_or(src);
                output.push_str(&format!("[{label}]({src})"));
                if let Some(description) = pick(
                    translated.and_then(|c| c.description.as_deref()),
                    source.and_then(|c| c.description.as_deref()),
                ) {
                    output.push_str(&format!(" - {description}"));
                }
                output.push_str("\n\n");
            }

            ModuleType::Component => {
                let content = module.content.as_component();
                let quantity = content.and_then(|c| c.quantity).unwrap_or(1);
                let label = content
                    .and_then(|c| c.component_id)
                    .and_then(|id| view.components.get(&id))
                    .map(|c| format!("{} {}", c.code, c.description))
                    .unwrap_or_else(|| "–".to_string());
                output.push_str(&format!(
                    "{} {} × {}\n\n",
                    self.options.list_marker, quantity, label
                ));
            }

            kind => {
                output.push_str(&format!(
                    "<!-- unsupported module type: {} -->\n\n",
                    kind.as_str()
                ));
            }
        }
    }

    fn render_media(
        &self,
        output: &mut String,
        module: &ContentModule,
        overlay: Option<&ModuleContent>,
    ) {
        let source = module.content.as_media();
        let translated = overlay.and_then(ModuleContent::as_media);
        let src = source.and_then(|c| c.src.as_deref()).unwrap_or("");
        let alt = pick(
            translated.and_then(|c| c.alt.as_deref()),
            source.and_then(|c| c.alt.as_deref()),
        )
        .unwrap_or("");
        output.push_str(&format!("![{alt}]({src})\n"));
        if let Some(caption) = pick(
            translated.and_then(|c| c.caption.as_deref()),
            source.and_then(|c| c.caption.as_deref()),
        ) {
            output.push_str(&format!("*{caption}*\n"));
        }
        output.push('\n');
    }

    fn render_table(
        &self,
        output: &mut String,
        module: &ContentModule,
        overlay: Option<&ModuleContent>,
    ) {
        let Some(source) = module.content.as_table() else {
            return;
        };
        let translated = overlay.and_then(ModuleContent::as_table);

        let headers = source.headers.as_deref().unwrap_or(&[]);
        let rows = source.rows.as_deref().unwrap_or(&[]);
        if headers.is_empty() && rows.is_empty() {
            return;
        }

        let translated_headers = translated.and_then(|c| c.headers.as_deref());
        let translated_rows = translated.and_then(|c| c.rows.as_deref());

        let columns = source.column_count().max(1);

        if !headers.is_empty() {
            let cells: Vec<&str> = (0..headers.len())
                .map(|i| {
                    pick(
                        translated_headers.and_then(|h| h.get(i)).map(String::as_str),
                        Some(headers[i].as_str()),
                    )
                    .unwrap_or("")
                })
                .collect();
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        } else {
            output.push_str(&format!("|{}\n", " |".repeat(columns)));
        }
        output.push_str(&format!("|{}\n", " --- |".repeat(columns)));

        for (row_idx, row) in rows.iter().enumerate() {
            let cells: Vec<&str> = (0..row.len())
                .map(|i| {
                    pick(
                        translated_rows
                            .and_then(|r| r.get(row_idx))
                            .and_then(|r| r.get(i))
                            .map(String::as_str),
                        Some(row[i].as_str()),
                    )
                    .unwrap_or("")
                })
                .collect();
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }

        if let Some(caption) = pick(
            translated.and_then(|c| c.caption.as_deref()),
            source.caption.as_deref(),
        ) {
            output.push_str(&format!("\n*{caption}*\n"));
        }
        output.push('\n');
    }

    fn render_alert(
        &self,
        output: &mut String,
        kind: &ModuleType,
        module: &ContentModule,
        overlay: Option<&ModuleContent>,
    ) {
        let source = module.content.as_alert();
        let translated = overlay.and_then(ModuleContent::as_alert);
        let tag = kind.as_str().to_uppercase().replace('-', " ");

        let title = pick(
            translated.and_then(|c| c.title.as_deref()),
            source.and_then(|c| c.title.as_deref()),
        );
        match title {
            Some(title) => output.push_str(&format!("> **{tag}: {title}**\n")),
            None => output.push_str(&format!("> **{tag}**\n")),
        }
        if let Some(body) = pick(
            translated.and_then(|c| c.body_for(kind)),
            source.and_then(|c| c.body_for(kind)),
        ) {
            output.push_str(&format!("> {body}\n"));
        }
        output.push('\n');
    }

    fn render_checklist(
        &self,
        output: &mut String,
        module: &ContentModule,
        overlay: Option<&ModuleContent>,
    ) {
        let Some(source) = module.content.as_checklist() else {
            return;
        };
        let translated = overlay.and_then(ModuleContent::as_checklist);

        for (idx, item) in source.items.iter().enumerate() {
            let text = pick(
                translated
                    .and_then(|c| c.items.get(idx))
                    .and_then(|i| i.text.as_deref()),
                item.text.as_deref(),
            )
            .unwrap_or("");
            let mark = if item.checked { "x" } else { " " };
            output.push_str(&format!("{} [{mark}] {text}\n", self.options.list_marker));
        }
        output.push('\n');
    }

    fn render_bom(
        &self,
        output: &mut String,
        view: &ManualView,
        module: &ContentModule,
        overlay: Option<&ModuleContent>,
    ) {
        let Some(source) = module.content.as_bom() else {
            return;
        };
        let translated = overlay.and_then(ModuleContent::as_bom);

        if let Some(title) = pick(
            translated.and_then(|c| c.title.as_deref()),
            source.title.as_deref(),
        ) {
            output.push_str(&format!("**{title}**\n\n"));
        }

        let header = |key: &str, fallback: &str| -> String {
            pick(
                translated
                    .and_then(|c| c.headers.as_ref())
                    .and_then(|h| h.get(key))
                    .map(String::as_str),
                source
                    .headers
                    .as_ref()
                    .and_then(|h| h.get(key))
                    .map(String::as_str),
            )
            .unwrap_or(fallback)
            .to_string()
        };

        output.push_str(&format!(
            "| {} | {} | {} |\n| --- | --- | --- |\n",
            header("code", "Code"),
            header("description", "Description"),
            header("quantity", "Qty"),
        ));

        let entries = source
            .bom_id
            .and_then(|id| view.bom_entries.get(&id))
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        for entry in visible_entries(source, entries) {
            let code = entry.display_code();
            let description = entry
                .code()
                .and_then(|code| bom_row_description(source, translated, code))
                .or(entry.description())
                .unwrap_or("–");
            output.push_str(&format!(
                "| {code} | {description} | {} |\n",
                entry.item.quantity
            ));
        }
        output.push('\n');
    }
}

/// The BOM rows the reader currently sees: the filter restricts rendering to
/// the listed component codes when present.
fn visible_entries<'a>(
    content: &BomContent,
    entries: &'a [crate::model::BomEntry],
) -> Vec<&'a crate::model::BomEntry> {
    match &content.filtered_component_codes {
        Some(codes) => entries
            .iter()
            .filter(|e| e.code().is_some_and(|c| codes.iter().any(|f| f == c)))
            .collect(),
        None => entries.iter().collect(),
    }
}

/// Per-code description override: the translated map wins, then the source
/// map; the component's own description is the final fallback.
fn bom_row_description<'a>(
    source: &'a BomContent,
    translated: Option<&'a BomContent>,
    code: &str,
) -> Option<&'a str> {
    pick(
        translated
            .and_then(|c| c.descriptions.as_ref())
            .and_then(|d| d.get(code))
            .map(String::as_str),
        source
            .descriptions
            .as_ref()
            .and_then(|d| d.get(code))
            .map(String::as_str),
    )
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
