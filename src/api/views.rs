//! Server-rendered HTML for the listing and upload pages.

use crate::store::FileInfo;

/// The file listing: one row per stored file with a download link.
pub fn listing_page(files: &[FileInfo]) -> String {
    let mut rows = String::new();
    for file in files {
        rows.push_str(&format!(
            "        <tr><td><a href=\"/files/{href}\">{name}</a></td><td>{size}</td></tr>\n",
            href = urlencoding::encode(&file.name),
            name = escape_html(&file.name),
            size = file.size,
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <title>Uploaded Files</title>
  </head>
  <body>
    <h1>Uploaded Files</h1>
    <table>
      <thead>
        <tr><th>Name</th><th>Size (bytes)</th></tr>
      </thead>
      <tbody>
{rows}      </tbody>
    </table>
    <p><a href="/upload">Upload a file</a></p>
  </body>
</html>
"#
    )
}

/// The upload form, optionally carrying an inline validation message.
pub fn upload_page(error: Option<&str>) -> String {
    let error_html = match error {
        Some(message) => format!("    <p class=\"error\">{}</p>\n", escape_html(message)),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <title>Upload File</title>
  </head>
  <body>
    <h1>Upload File</h1>
{error_html}    <form method="post" action="/upload" enctype="multipart/form-data">
      <input type="file" name="multipartFile">
      <button type="submit">Upload</button>
    </form>
    <p><a href="/files">Back to files</a></p>
  </body>
</html>
"#
    )
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_escapes_and_links_names() {
        let files = vec![FileInfo {
            name: "a<b>.txt".to_string(),
            size: 3,
        }];
        let page = listing_page(&files);
        assert!(page.contains("a&lt;b&gt;.txt"));
        assert!(page.contains("/files/a%3Cb%3E.txt"));
        assert!(page.contains("<td>3</td>"));
    }

    #[test]
    fn upload_page_shows_error_only_when_present() {
        assert!(!upload_page(None).contains("class=\"error\""));
        let page = upload_page(Some("Please select valid file."));
        assert!(page.contains("Please select valid file."));
    }
}
