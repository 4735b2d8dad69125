use std::io::BufReader;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

use crate::error::{PubMedError, Result};

/// Extract PMIDs from an ESearch XML response.
///
/// Collects the text of every `<Id>` element in document order. A non-empty
/// `<ERROR>` element surfaces as an API error.
pub(crate) fn parse_pmids_from_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(BufReader::new(xml.as_bytes()));
    reader.config_mut().trim_text(true);

    let mut pmids = Vec::new();
    let mut buf = Vec::new();
    let mut in_id = false;
    let mut in_error = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"Id" => in_id = true,
                b"ERROR" => in_error = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"Id" => in_id = false,
                b"ERROR" => in_error = false,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| PubMedError::XmlError(err.to_string()))?
                    .into_owned();

                if in_error {
                    return Err(PubMedError::ApiError {
                        status: 200,
                        message: format!("NCBI ESearch API error: {}", text),
                    });
                }
                if in_id {
                    pmids.push(text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PubMedError::XmlError(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    debug!(pmids_found = pmids.len(), "Parsed ESearch XML response");

    Ok(pmids)
}
