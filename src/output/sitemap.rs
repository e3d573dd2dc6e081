// src/output/sitemap.rs
// =============================================================================
// This module writes and reads sitemap documents.
//
// Format (the sitemaps.org protocol, minus the optional fields):
//
//   <?xml version="1.0" encoding="UTF-8"?>
//   <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//     <url>
//       <loc>https://example.com/</loc>
//     </url>
//   </urlset>
//
// quick-xml escapes "&", "<" etc. on the way out and unescapes them on the
// way in, so parse_sitemap(write_sitemap(urls)) gives back the same list.
// =============================================================================

use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// Renders URLs as a sitemap document, keeping their order
pub fn write_sitemap<'a, I>(urls: I) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset))?;

    for url in urls {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        writer.write_event(Event::Start(BytesStart::new("loc")))?;
        // BytesText::new escapes the content for us
        writer.write_event(Event::Text(BytesText::new(url)))?;
        writer.write_event(Event::End(BytesEnd::new("loc")))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

/// Extracts every `<loc>` value, in document order. Whitespace is trimmed.
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut urls = Vec::new();
    let mut in_loc = false;
    let mut current = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"loc" => {
                in_loc = true;
                current.clear();
            }
            Event::Text(e) if in_loc => current.push_str(&e.unescape()?),
            Event::End(e) if e.local_name().as_ref() == b"loc" => {
                in_loc = false;
                let url = current.trim();
                if !url.is_empty() {
                    urls.push(url.to_string());
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_keeps_order_and_escaping() {
        let urls = vec![
            "https://example.com/",
            "https://example.com/search?q=rust&page=2",
            "https://example.com/a<b>",
            "https://example.com/about",
        ];
        let xml = write_sitemap(urls.iter().copied()).unwrap();
        assert!(xml.contains("q=rust&amp;page=2"));
        assert_eq!(parse_sitemap(&xml).unwrap(), urls);
    }

    #[test]
    fn test_written_document_shape() {
        let xml = write_sitemap(["https://example.com/"]).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_empty_sitemap() {
        let xml = write_sitemap(std::iter::empty::<&str>()).unwrap();
        assert!(parse_sitemap(&xml).unwrap().is_empty());
    }

    #[test]
    fn test_parse_hand_written_sitemap() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc></url>
  <url>
    <loc>
      https://example.com/blog
    </loc>
    <lastmod>2024-01-01</lastmod>
  </url>
</urlset>"#;
        assert_eq!(
            parse_sitemap(xml).unwrap(),
            vec!["https://example.com/", "https://example.com/blog"]
        );
    }
}
