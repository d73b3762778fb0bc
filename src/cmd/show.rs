use postcache::{Error, PostCache, Result};
use std::io::Write;

pub fn show<W: Write>(cache: &PostCache, id: usize, mut out: W) -> Result<()> {
    let doc = cache.get_by_id(id).ok_or(Error::NotFound(id))?;
    log::debug!("showing post {} ({:?})", doc.id, doc.title);

    out.write_all(doc.body.as_bytes())?;
    Ok(())
}
