use postcache::{PostCache, Result};
use std::io::Write;

pub fn list<W: Write>(cache: &PostCache, mut out: W) -> Result<()> {
    for doc in cache.get_all().iter() {
        writeln!(out, "{}\t{}", doc.id, doc.title)?;
    }

    Ok(())
}
