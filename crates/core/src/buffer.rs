use common::error::Error;

/// `len` copies of `value`.
///
/// `len` is `None` when the caller's size computation overflowed. Both that
/// and a failed allocation map to `GraphTooLarge` instead of a panic or abort.
pub(crate) fn try_filled<T: Clone>(
    len: Option<usize>,
    value: T,
    nodes: usize,
) -> Result<Vec<T>, Error> {
    let len = len.ok_or(Error::GraphTooLarge { nodes })?;

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| Error::GraphTooLarge { nodes })?;
    buffer.resize(len, value);
    Ok(buffer)
}
