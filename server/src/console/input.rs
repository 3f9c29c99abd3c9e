//! Whitespace-separated token input.
//!
//! Values may be typed one per line or several on the same line, the
//! reader doesn't care where the line breaks fall.

use std::collections::VecDeque;
use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// A single token read from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A token that parsed as a signed integer.
    Integer(i64),
    /// Anything else.
    Text(String),
}

/// Splits an async line stream into [`Token`]s.
#[derive(Debug)]
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: AsyncBufRead + Unpin> TokenReader<R> {
    /// Wraps `reader`.
    pub fn new(reader: R) -> Self {
        TokenReader {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Reads the next token, pulling new lines as needed.
    ///
    /// Returns [`None`] once the input is exhausted.
    pub async fn next_token(&mut self) -> io::Result<Option<Token>> {
        loop {
            if let Some(raw) = self.pending.pop_front() {
                let token = match raw.parse::<i64>() {
                    Ok(value) => Token::Integer(value),
                    Err(_) => Token::Text(raw),
                };
                return Ok(Some(token));
            }

            let mut line = String::new();
            if self.reader.read_line(&mut line).await? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(String::from));
        }
    }

    /// Drops whatever is left of the current line.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tokens_across_lines() {
        let input: &[u8] = b"1 2\n\n  3\nabc -4\n";
        let mut reader = TokenReader::new(input);

        assert_eq!(reader.next_token().await.unwrap(), Some(Token::Integer(1)));
        assert_eq!(reader.next_token().await.unwrap(), Some(Token::Integer(2)));
        assert_eq!(reader.next_token().await.unwrap(), Some(Token::Integer(3)));
        assert_eq!(
            reader.next_token().await.unwrap(),
            Some(Token::Text("abc".to_string()))
        );
        assert_eq!(reader.next_token().await.unwrap(), Some(Token::Integer(-4)));
        assert_eq!(reader.next_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_discard_pending() {
        let input: &[u8] = b"x 7 8\n9\n";
        let mut reader = TokenReader::new(input);

        assert_eq!(
            reader.next_token().await.unwrap(),
            Some(Token::Text("x".to_string()))
        );
        reader.discard_pending();
        assert_eq!(reader.next_token().await.unwrap(), Some(Token::Integer(9)));
    }
}
