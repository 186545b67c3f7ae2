use typegraph_encode::{unframe, Graph, GraphConfig, Key, Kind};
use typegraph_kv::KvStore;

use crate::error::CliError;
use crate::utils::parse_key;

pub fn handle_show(config: GraphConfig, key: &str) -> Result<(), CliError> {
    let graph = Graph::open(config)?;
    let key = Key::from_bytes(parse_key(key));
    let value = graph
        .store()
        .get(key.as_bytes())?
        .ok_or_else(|| CliError::MissingKey(key.to_string()))?;
    print!("{}", describe(&key, &value));
    graph.close()?;
    Ok(())
}

/// A human-readable rendering of a stored value, one framed field per line.
pub fn describe(key: &Key, value: &[u8]) -> String {
    let bytes = key.as_bytes();
    if value.is_empty() {
        return format!("{key}: (edge)\n");
    }
    if bytes.ends_with(b"\0name") || bytes.ends_with(b"\0scope") {
        return format!("{key}: {}\n", render_field(value));
    }
    let fields = match unframe(value) {
        Ok(fields) => fields,
        Err(err) => {
            log::warn!("{key} does not hold a framed value: {err}");
            return format!("{key}: {}\n", render_field(value));
        }
    };

    let mut out = format!("{key}:\n");
    // Types lead with their kind tag, declarations carry it second.
    let tag_index = if bytes.starts_with(b"types/") {
        Some(0)
    } else if bytes.windows(9).any(|w| w == b"\0objects/") {
        Some(1)
    } else {
        None
    };
    for (i, field) in fields.iter().enumerate() {
        let kind = match (tag_index, field) {
            (Some(at), [tag]) if at == i => Kind::from_tag(*tag).map(|k| format!(" ({k:?})")),
            _ => None,
        };
        out.push_str(&format!("  {i}: {}{}\n", render_field(field), kind.unwrap_or_default()));
    }
    out
}

fn render_field(bytes: &[u8]) -> String {
    let printable = |b: &u8| (0x20..0x7f).contains(b);
    if bytes.is_empty() {
        "\"\"".to_string()
    } else if bytes.first().is_some_and(printable) && bytes.iter().all(|b| *b == 0 || printable(b)) {
        format!("\"{}\"", Key::from_bytes(bytes))
    } else {
        let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
        format!("[{}]", hex.join(" "))
    }
}
