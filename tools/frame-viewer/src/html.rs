// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! HTML presenter for a [`Page`].

use crate::render::{Block, Page, TableView};

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;width:100%;margin-bottom:1rem}\
th,td{border:1px solid #ccc;padding:4px 8px;text-align:left}\
.error{color:#b00020}.warning{color:#8a6d00}.caption{color:#666}";

pub fn to_html(page: &Page) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(&page.title)));
    out.push_str(&format!("<style>{STYLE}</style>\n"));
    out.push_str("</head>\n<body>\n");

    for block in &page.blocks {
        write_block(&mut out, block);
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn write_block(out: &mut String, block: &Block) {
    let line = match block {
        Block::Title(text) => format!("<h1>{}</h1>", escape(text)),
        Block::Divider => "<hr>".to_string(),
        Block::Header(text) => format!("<h2>{}</h2>", escape(text)),
        Block::Subheader(text) => format!("<h3>{}</h3>", escape(text)),
        Block::Caption(text) => format!("<p class=\"caption\">{}</p>", escape(text)),
        Block::Error(text) => format!("<div class=\"error\">{}</div>", escape(text)),
        Block::Warning(text) => format!("<div class=\"warning\">{}</div>", escape(text)),
        Block::Code(text) => format!("<pre><code>{}</code></pre>", escape(text)),
        Block::Table(table) => return write_table(out, table),
    };
    out.push_str(&line);
    out.push('\n');
}

fn write_table(out: &mut String, table: &TableView) {
    out.push_str("<table>\n<thead><tr>");
    for header in &table.headers {
        out.push_str(&format!("<th>{}</th>", escape(header)));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

fn escape(text: &str) -> String {
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
