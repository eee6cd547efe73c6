//! Splitting of concatenated PEM certificate chains.
//!
//! A node's `node.full.crt.pem` holds two certificates back to back
//! (node certificate first, CA certificate second), separated by arbitrary
//! whitespace. The splitter yields each block with its end delimiter and a
//! terminating newline restored, so every item is independently decodable.

const CERT_END: &[u8] = b"-----END CERTIFICATE-----";

/// Lazy iterator over the individual PEM blocks of a chain.
///
/// Borrows the input, so splitting can be restarted by calling
/// [`split_chain`] again on the same buffer. Empty segments (stray
/// whitespace after the last delimiter) are dropped.
pub struct PemBlocks<'a> {
    remaining: &'a [u8],
}

/// Split raw file bytes into individual PEM certificate blocks, in input
/// order.
pub fn split_chain(data: &[u8]) -> PemBlocks<'_> {
    PemBlocks { remaining: data }
}

impl Iterator for PemBlocks<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        loop {
            if self.remaining.is_empty() {
                return None;
            }
            let segment = match find_subslice(self.remaining, CERT_END) {
                Some(at) => {
                    let segment = &self.remaining[..at];
                    self.remaining = &self.remaining[at + CERT_END.len()..];
                    segment
                }
                None => std::mem::take(&mut self.remaining),
            };
            let trimmed = segment.trim_ascii();
            if trimmed.is_empty() {
                continue;
            }
            let mut block = Vec::with_capacity(trimmed.len() + CERT_END.len() + 2);
            block.extend_from_slice(trimmed);
            block.push(b'\n');
            block.extend_from_slice(CERT_END);
            block.push(b'\n');
            return Some(block);
        }
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK_A: &str = "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n";
    const BLOCK_B: &str = "-----BEGIN CERTIFICATE-----\nBBBB\n-----END CERTIFICATE-----\n";

    #[test]
    fn splits_two_blocks_in_order() {
        let chain = format!("{BLOCK_A}{BLOCK_B}");
        let blocks: Vec<Vec<u8>> = split_chain(chain.as_bytes()).collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], BLOCK_A.as_bytes());
        assert_eq!(blocks[1], BLOCK_B.as_bytes());
    }

    #[test]
    fn tolerates_whitespace_between_and_after_blocks() {
        let chain = format!("\n\n  {BLOCK_A}\r\n\t \n{BLOCK_B}   \n\n");
        let blocks: Vec<Vec<u8>> = split_chain(chain.as_bytes()).collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], BLOCK_A.as_bytes());
        assert_eq!(blocks[1], BLOCK_B.as_bytes());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(split_chain(b"").count(), 0);
        assert_eq!(split_chain(b"  \n\t\n").count(), 0);
    }

    #[test]
    fn restartable_on_same_buffer() {
        let chain = format!("{BLOCK_A}{BLOCK_B}");
        let data = chain.as_bytes();
        assert_eq!(split_chain(data).count(), 2);
        assert_eq!(split_chain(data).count(), 2);
    }

    #[test]
    fn block_without_delimiter_gets_one_appended() {
        let partial = "-----BEGIN CERTIFICATE-----\nCCCC";
        let blocks: Vec<Vec<u8>> = split_chain(partial.as_bytes()).collect();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].ends_with(b"-----END CERTIFICATE-----\n"));
    }
}
