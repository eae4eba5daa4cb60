use std::io::{self, BufRead, Lines};

pub struct UrlReader<R> {
    error: Option<io::Error>,
    lines: Lines<R>,
}

impl<R: BufRead> UrlReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            error: None,
            lines: reader.lines(),
        }
    }

    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }
}

impl<R: BufRead> Iterator for UrlReader<R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() {
            return None;
        }

        match self.lines.next()? {
            Ok(line) => Some(line),
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

#[cfg(test)]
mod url_reader_tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    #[test]
    fn yields_one_url_per_line() {
        let reader = UrlReader::new(Cursor::new("https://google.com\nhttp://bad1url.org\n"));

        assert_eq!(
            vec!["https://google.com", "http://bad1url.org"],
            reader.collect::<Vec<String>>()
        );
    }

    #[test]
    fn strips_carriage_returns() {
        let reader = UrlReader::new(Cursor::new("https://google.com\r\nhttp://bad1url.org"));

        assert_eq!(
            vec!["https://google.com", "http://bad1url.org"],
            reader.collect::<Vec<String>>()
        );
    }

    #[test]
    fn passes_empty_lines_through() {
        let reader = UrlReader::new(Cursor::new("\nhttps://google.com\n\n"));

        assert_eq!(vec!["", "https://google.com", ""], reader.collect::<Vec<String>>());
    }

    #[test]
    fn does_not_normalise_urls() {
        let reader = UrlReader::new(Cursor::new("  HTTPS://Google.com/a/../b  \n"));

        assert_eq!(vec!["  HTTPS://Google.com/a/../b  "], reader.collect::<Vec<String>>());
    }

    #[test]
    fn yields_nothing_for_an_empty_stream() {
        let mut reader = UrlReader::new(Cursor::new(""));

        assert!(reader.next().is_none());
        assert!(reader.error().is_none());
    }

    #[test]
    fn stops_at_a_read_error_and_retains_it() {
        let mut reader = UrlReader::new(BufReader::new(FailingReader::new("https://google.com\n")));

        assert_eq!(Some("https://google.com".to_string()), reader.next());
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
        assert_eq!("stream went away", reader.error().unwrap().to_string());
    }

    #[test]
    fn treats_invalid_utf8_as_a_read_error() {
        let mut reader = UrlReader::new(Cursor::new(vec![0xff, 0xfe, b'\n']));

        assert!(reader.next().is_none());
        assert_eq!(io::ErrorKind::InvalidData, reader.error().unwrap().kind());
    }

    struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl FailingReader {
        fn new(data: &str) -> Self {
            Self {
                data: Cursor::new(data.as_bytes().to_vec()),
            }
        }
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "stream went away")),
                n => Ok(n),
            }
        }
    }
}
