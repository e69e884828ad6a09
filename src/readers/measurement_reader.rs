use crate::error::{LoadError, LoadResult};
use crate::models::{MeasurementRecord, MeasurementTable};
use crate::utils::constants::{
    COL_DATE, COL_LAT, COL_LOCATION, COL_LON, COL_PARAMETER, COL_UNIT, COL_VALUE, NULL_MARKERS,
    REQUIRED_COLUMNS,
};
use crate::utils::parse_timestamp;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Positions of the known columns within a header row
#[derive(Debug)]
struct ColumnIndex {
    date: usize,
    location: usize,
    lat: usize,
    lon: usize,
    parameter: usize,
    value: usize,
    unit: Option<usize>,
    extra: Vec<(usize, String)>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> LoadResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let known = |name: &str| REQUIRED_COLUMNS.contains(&name) || name == COL_UNIT;
        let extra = headers
            .iter()
            .enumerate()
            .filter(|&(_, h)| !known(h))
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        // Presence checked above
        let required = |name: &str| find(name).unwrap_or_default();

        Ok(Self {
            date: required(COL_DATE),
            location: required(COL_LOCATION),
            lat: required(COL_LAT),
            lon: required(COL_LON),
            parameter: required(COL_PARAMETER),
            value: required(COL_VALUE),
            unit: find(COL_UNIT),
            extra,
        })
    }
}

pub struct MeasurementReader {
    delimiter: u8,
}

impl MeasurementReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Load a measurement table from a CSV file
    pub fn load(&self, path: &Path) -> LoadResult<MeasurementTable> {
        let file = File::open(path)?;
        let table = self.load_from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            rows = table.len(),
            "Loaded measurement table"
        );
        Ok(table)
    }

    /// Load a measurement table from any CSV byte stream.
    ///
    /// Every timestamp must parse, otherwise the whole load fails. Rows
    /// missing `value`, `lat` or `lon` (including any spelling of NaN) are
    /// dropped. Surrounding whitespace is ignored in the date and numeric
    /// cells only; text cells are kept as written.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> LoadResult<MeasurementTable> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let columns = ColumnIndex::resolve(&headers)?;

        let mut records = Vec::new();
        let mut dropped = 0usize;

        for (index, row_result) in csv_reader.records().enumerate() {
            let row = row_result?;
            let row_number = index + 1;

            match self.parse_row(&row, &columns, row_number)? {
                Some(record) => records.push(record),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!(dropped, "Dropped rows missing value or coordinates");
        }

        Ok(MeasurementTable::new(records))
    }

    /// Parse a single data row. `Ok(None)` means the row lacks an essential
    /// numeric field and is skipped.
    fn parse_row(
        &self,
        row: &StringRecord,
        columns: &ColumnIndex,
        row_number: usize,
    ) -> LoadResult<Option<MeasurementRecord>> {
        let cell = |index: usize| row.get(index).unwrap_or("");

        let raw_date = cell(columns.date);
        let date = parse_timestamp(raw_date).ok_or_else(|| LoadError::InvalidTimestamp {
            row: row_number,
            value: raw_date.to_string(),
        })?;

        let value = parse_optional_number(cell(columns.value), COL_VALUE, row_number)?;
        let latitude = parse_optional_number(cell(columns.lat), COL_LAT, row_number)?;
        let longitude = parse_optional_number(cell(columns.lon), COL_LON, row_number)?;

        let (Some(value), Some(latitude), Some(longitude)) = (value, latitude, longitude) else {
            return Ok(None);
        };

        let unit = columns
            .unit
            .map(cell)
            .filter(|u| !is_null(u.trim()))
            .map(str::to_string);

        let extra: BTreeMap<String, String> = columns
            .extra
            .iter()
            .map(|(index, name)| (name.clone(), cell(*index).to_string()))
            .collect();

        let record = MeasurementRecord::new(
            date,
            cell(columns.location).to_string(),
            latitude,
            longitude,
            cell(columns.parameter).to_string(),
            value,
            unit,
        )
        .with_extra(extra);

        Ok(Some(record))
    }
}

impl Default for MeasurementReader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_null(cell: &str) -> bool {
    NULL_MARKERS.contains(&cell)
}

fn parse_optional_number(cell: &str, column: &str, row: usize) -> LoadResult<Option<f64>> {
    let cell = cell.trim();
    if is_null(cell) {
        return Ok(None);
    }

    // `f64::from_str` accepts NaN in any case and sign
    cell.parse::<f64>()
        .map(|number| (!number.is_nan()).then_some(number))
        .map_err(|_| LoadError::InvalidNumber {
            row,
            column: column.to_string(),
            value: cell.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "date,location,lat,lon,parameter,value,unit";

    fn load_str(content: &str) -> LoadResult<MeasurementTable> {
        MeasurementReader::new().load_from_reader(content.as_bytes())
    }

    #[test]
    fn test_load_parses_rows() {
        let csv = format!(
            "{HEADER}\n\
            2024-01-01 00:00:00,Delhi,28.61,77.21,pm25,88.5,µg/m³\n\
            2024-01-02,Paris,48.85,2.35,o3,41,µg/m³\n"
        );

        let table = load_str(&csv).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.records()[0];
        assert_eq!(first.location, "Delhi");
        assert_eq!(first.parameter, "pm25");
        assert_eq!(first.value, 88.5);
        assert_eq!(first.unit.as_deref(), Some("µg/m³"));
        assert_eq!(
            table.records()[1].date,
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_load_drops_rows_missing_essentials() {
        let csv = format!(
            "{HEADER}\n\
            2024-01-01,Delhi,28.61,77.21,pm25,,µg/m³\n\
            2024-01-01,Delhi,,77.21,pm25,12,µg/m³\n\
            2024-01-01,Delhi,28.61,NaN,pm25,12,µg/m³\n\
            2024-01-01,Delhi,28.61,77.21,pm25,12,\n"
        );

        let table = load_str(&csv).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].unit, None);
    }

    #[test]
    fn test_load_drops_any_nan_spelling() {
        let csv = format!(
            "{HEADER}\n\
            2024-01-01,Delhi,28.61,77.21,pm25,10,µg/m³\n\
            2024-01-02,Delhi,28.61,77.21,pm25,NAN,µg/m³\n\
            2024-01-03,Delhi,28.61,-nan,pm25,30,µg/m³\n\
            2024-01-04,Delhi,Nan,77.21,pm25,20,µg/m³\n"
        );

        let table = load_str(&csv).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.iter().all(|r| !r.value.is_nan() && !r.longitude.is_nan()));
        assert_eq!(table.records()[0].value, 10.0);
    }

    #[test]
    fn test_load_trims_numbers_but_keeps_text_cells() {
        let csv = "date,location,lat,lon,parameter,value,unit,note\n\
            2024-01-01 , Delhi ,28.61, 77.21 ,pm25, 10 ,µg/m³, roof sensor \n";

        let table = load_str(csv).unwrap();

        let record = &table.records()[0];
        assert_eq!(record.value, 10.0);
        assert_eq!(record.longitude, 77.21);
        assert_eq!(record.location, " Delhi ");
        assert_eq!(
            record.extra.get("note").map(String::as_str),
            Some(" roof sensor ")
        );
    }

    #[test]
    fn test_load_fails_on_bad_timestamp() {
        let csv = format!(
            "{HEADER}\n\
            2024-01-01,Delhi,28.61,77.21,pm25,10,µg/m³\n\
            not-a-date,Delhi,28.61,77.21,pm25,,µg/m³\n"
        );

        match load_str(&csv) {
            Err(LoadError::InvalidTimestamp { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected timestamp error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_fails_on_non_numeric_value() {
        let csv = format!("{HEADER}\n2024-01-01,Delhi,28.61,77.21,pm25,high,µg/m³\n");

        assert!(matches!(
            load_str(&csv),
            Err(LoadError::InvalidNumber { ref column, .. }) if column == "value"
        ));
    }

    #[test]
    fn test_load_reports_missing_columns() {
        let csv = "date,location,parameter,value\n2024-01-01,Delhi,pm25,1\n";

        match load_str(csv) {
            Err(LoadError::MissingColumns(columns)) => {
                assert_eq!(columns, vec!["lat".to_string(), "lon".to_string()]);
            }
            other => panic!("expected missing columns, got {:?}", other),
        }
    }

    #[test]
    fn test_load_keeps_extra_columns_and_tolerates_missing_unit() {
        let csv = "location,date,lat,lon,parameter,value,country\n\
            Delhi,2024-01-01,28.61,77.21,pm25,10,IN\n";

        let table = load_str(csv).unwrap();

        let record = &table.records()[0];
        assert_eq!(record.unit, None);
        assert_eq!(record.extra.get("country").map(String::as_str), Some("IN"));
    }

    #[test]
    fn test_load_file_with_custom_delimiter() -> LoadResult<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "date;location;lat;lon;parameter;value;unit")?;
        writeln!(temp_file, "2024-01-01;Delhi;28.61;77.21;pm25;10;µg/m³")?;

        let table = MeasurementReader::with_delimiter(b';').load(temp_file.path())?;

        assert_eq!(table.len(), 1);
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let result = MeasurementReader::new().load(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
