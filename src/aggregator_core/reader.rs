//! CSV order source with configurable columns and malformed-record policy

use super::normalizer::Order;
use crate::config::{Config, ParseErrorPolicy};
use std::fs::File;
use std::io::{self, IsTerminal, Read};

pub struct CsvOrderSource {
    records: csv::StringRecordsIntoIter<Box<dyn Read + Send>>,
    date_column: usize,
    value_column: usize,
    policy: ParseErrorPolicy,
    dropped: u64,
}

impl CsvOrderSource {
    /// Open the configured input stream.
    ///
    /// Returns `Ok(None)` when there is no input at all: no file path
    /// configured and stdin is a terminal rather than a pipe.
    pub fn open(config: &Config) -> io::Result<Option<Self>> {
        let input: Box<dyn Read + Send> = match &config.input_path {
            Some(path) => Box::new(File::open(path)?),
            None => {
                if io::stdin().is_terminal() {
                    return Ok(None);
                }
                Box::new(io::stdin())
            }
        };
        Ok(Some(Self::from_reader(input, config)))
    }

    fn from_reader(input: Box<dyn Read + Send>, config: &Config) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(config.csv_has_header)
            .flexible(true)
            .from_reader(input);
        Self {
            records: reader.into_records(),
            date_column: config.date_column,
            value_column: config.value_column,
            policy: config.on_parse_error,
            dropped: 0,
        }
    }

    /// Next validated order, or `None` at end of input.
    ///
    /// Rows that cannot be tokenized, lack the configured columns, or fail
    /// date/value parsing are skipped per the malformed-record policy and
    /// counted; they never reach the caller.
    pub fn next_order(&mut self) -> Option<Order> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => {
                    self.drop_record(&format!("unreadable row: {}", e));
                    continue;
                }
            };
            let (Some(raw_date), Some(raw_value)) = (
                record.get(self.date_column),
                record.get(self.value_column),
            ) else {
                self.drop_record("missing date or value column");
                continue;
            };
            match Order::parse(raw_date, raw_value) {
                Ok(order) => return Some(order),
                Err(e) => self.drop_record(&e.to_string()),
            }
        }
    }

    /// Count of records skipped so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn drop_record(&mut self, reason: &str) {
        self.dropped += 1;
        if self.policy == ParseErrorPolicy::Warn {
            log::warn!("dropping record: {}", reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn test_config(path: std::path::PathBuf) -> Config {
        Config {
            input_path: Some(path),
            date_column: 6,
            value_column: 5,
            csv_has_header: true,
            on_parse_error: ParseErrorPolicy::Drop,
            channel_buffer: 4,
        }
    }

    fn write_fixture(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_configured_columns() {
        let file = write_fixture(&[
            "InvoiceNo,StockCode,Description,Quantity,Country,UnitPrice,InvoiceDate",
            "536365,85123A,HOLDER,6,UK,121.2,2015-06-01 00:27:24",
            "536366,71053,LANTERN,2,UK,127.2,2017-03-01 10:12:34",
        ]);
        let config = test_config(file.path().to_path_buf());
        let mut source = CsvOrderSource::open(&config).unwrap().unwrap();

        let order = source.next_order().unwrap();
        assert_eq!(order.date, "2015-06-01");
        assert_eq!(order.value, 121.2);

        let order = source.next_order().unwrap();
        assert_eq!(order.date, "2017-03-01");
        assert_eq!(order.value, 127.2);

        assert!(source.next_order().is_none());
        assert_eq!(source.dropped(), 0);
    }

    #[test]
    fn test_drops_malformed_records() {
        let file = write_fixture(&[
            "a,b,c,d,e,value,date",
            "x,x,x,x,x,10.0,2015-06-01 00:00:00",
            "x,x,x,x,x,not-a-number,2015-06-01 00:00:01",
            "x,x,x,x,x,20.0,01/06/2015 10:00:00",
            "x,x,x,x,x,30.0,2015-06-02 09:30:00",
            "short,row",
        ]);
        let config = test_config(file.path().to_path_buf());
        let mut source = CsvOrderSource::open(&config).unwrap().unwrap();

        let orders: Vec<Order> = std::iter::from_fn(|| source.next_order()).collect();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].date, "2015-06-01");
        assert_eq!(orders[1].date, "2015-06-02");
        assert_eq!(source.dropped(), 3);
    }

    #[test]
    fn test_headerless_input() {
        let file = write_fixture(&["x,x,x,x,x,5.5,2015-06-01 12:00:00"]);
        let mut config = test_config(file.path().to_path_buf());
        config.csv_has_header = false;
        let mut source = CsvOrderSource::open(&config).unwrap().unwrap();

        let order = source.next_order().unwrap();
        assert_eq!(order.date, "2015-06-01");
        assert_eq!(order.value, 5.5);
        assert!(source.next_order().is_none());
    }
}
