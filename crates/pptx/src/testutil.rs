//! Shared helpers for reading produced archives back in tests.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Archive entry names in stored order.
pub fn entry_names(path: &Path) -> Vec<String> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Read one named part out of the archive as a string.
pub fn read_part(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

/// Extract the unescaped text runs (`a:t` contents) from slide XML.
pub fn slide_texts(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut texts = Vec::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"a:t" => in_text_run = true,
            Ok(Event::Text(ref e)) if in_text_run => {
                texts.push(e.unescape().unwrap().into_owned());
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"a:t" => in_text_run = false,
            Ok(Event::Eof) => break,
            Err(e) => panic!("XML error in produced slide: {}", e),
            _ => {}
        }
    }

    texts
}
