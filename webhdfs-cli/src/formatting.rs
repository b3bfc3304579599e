use std::fmt::{Formatter, Display, Result as FmtResult};
use std::default::Default;

use chrono::{DateTime, Utc, Local, SecondsFormat};
use clap::{Args, ValueEnum};
use webhdfs_api::fs::{FileStatus, FileType, ContentSummary, FileChecksum};

#[derive(Debug)]
pub struct SizeType<T = u64> {
    pub value: T,
    pub unit: &'static str,
}

pub const KIBI: u64 = 1024;
pub const MEBI: u64 = KIBI * 1024;
pub const GIBI: u64 = MEBI * 1024;
pub const TEBI: u64 = GIBI * 1024;
pub const PEBI: u64 = TEBI * 1024;

pub const BASE_2_SIZE: [SizeType; 5] = [
    SizeType { value: PEBI, unit: "Pi" },
    SizeType { value: TEBI, unit: "Ti" },
    SizeType { value: GIBI, unit: "Gi" },
    SizeType { value: MEBI, unit: "Mi" },
    SizeType { value: KIBI, unit: "Ki" },
];

pub const KILO: u64 = 1000;
pub const MEGA: u64 = KILO * 1000;
pub const GIGA: u64 = MEGA * 1000;
pub const TERA: u64 = GIGA * 1000;
pub const PETA: u64 = TERA * 1000;

pub const BASE_10_SIZE: [SizeType; 5] = [
    SizeType { value: PETA, unit: "P" },
    SizeType { value: TERA, unit: "T" },
    SizeType { value: GIGA, unit: "G" },
    SizeType { value: MEGA, unit: "M" },
    SizeType { value: KILO, unit: "K" },
];

#[derive(Debug, Clone, ValueEnum)]
pub enum BaseSize {
    Base2,
    Base10,
    Raw,
}

impl Default for BaseSize {
    fn default() -> Self {
        BaseSize::Base2
    }
}

impl Display for BaseSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BaseSize::Base2 => write!(f, "base2"),
            BaseSize::Base10 => write!(f, "base10"),
            BaseSize::Raw => write!(f, "raw"),
        }
    }
}

pub fn bytes_to_unit(size: u64, base: &BaseSize) -> String {
    let list = match base {
        BaseSize::Base2 => BASE_2_SIZE,
        BaseSize::Base10 => BASE_10_SIZE,
        BaseSize::Raw => {
            return size.to_string();
        }
    };

    for base in list {
        if size >= base.value {
            let output_size = size / base.value;

            if size % base.value == 0 {
                return format!("{output_size}{}", base.unit);
            } else {
                return format!("~{output_size}{}", base.unit);
            }
        }
    }

    size.to_string()
}

#[derive(Debug, Clone, ValueEnum)]
pub enum DateFormat {
    Local,
    Utc,
    Unix
}

impl Default for DateFormat {
    fn default() -> Self {
        DateFormat::Local
    }
}

impl Display for DateFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DateFormat::Local => write!(f, "local"),
            DateFormat::Utc => write!(f, "utc"),
            DateFormat::Unix => write!(f, "unix"),
        }
    }
}

pub fn datetime_to_string(dt: &DateTime<Utc>, format: &DateFormat) -> String {
    match format {
        DateFormat::Local => {
            DateTime::<Local>::from(*dt).to_rfc3339_opts(SecondsFormat::Secs, false)
        },
        DateFormat::Utc => {
            dt.to_rfc3339_opts(SecondsFormat::Secs, false)
        },
        DateFormat::Unix => {
            dt.timestamp().to_string()
        }
    }
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// specifies the format for the file size output
    #[arg(long, default_value_t)]
    pub size_format: BaseSize,

    /// specifies the format for the timestamp output
    #[arg(long, default_value_t)]
    pub ts_format: DateFormat,
}

/// `drwxr-xr-x` style mode string
pub fn mode_string(status: &FileStatus) -> String {
    let prefix = match status.file_type {
        FileType::File => '-',
        FileType::Directory => 'd',
        FileType::Symlink => 'l',
    };

    format!("{}{}", prefix, status.permission.symbolic())
}

pub enum Float {
    Left,
    Right,
}

pub struct Column {
    name: &'static str,
    width: usize,
    float: Float,
}

impl Column {
    pub fn left(name: &'static str) -> Self {
        Column { name, width: name.len(), float: Float::Left }
    }

    pub fn right(name: &'static str) -> Self {
        Column { name, width: name.len(), float: Float::Right }
    }

    fn write_value<O>(&self, value: &str, output: &mut O) -> std::io::Result<()>
    where
        O: std::io::Write,
    {
        match self.float {
            Float::Left => write!(output, "{value:<width$}", width = self.width),
            Float::Right => write!(output, "{value:>width$}", width = self.width),
        }
    }
}

/// plain text table sized to its widest values
pub struct TextTable<const N: usize> {
    columns: [Column; N],
    rows: Vec<[String; N]>,
}

impl<const N: usize> TextTable<N> {
    pub fn with_columns(columns: [Column; N]) -> Self {
        TextTable {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: [String; N]) {
        for (value, col) in row.iter().zip(&mut self.columns) {
            let chars_count = value.chars().count();

            if chars_count > col.width {
                col.width = chars_count;
            }
        }

        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write<O>(&self, output: &mut O, header: bool) -> std::io::Result<()>
    where
        O: std::io::Write
    {
        if header {
            let names: [String; N] = std::array::from_fn(|index| self.columns[index].name.to_owned());

            self.write_row(output, &names)?;
        }

        for row in &self.rows {
            self.write_row(output, row)?;
        }

        Ok(())
    }

    fn write_row<O>(&self, output: &mut O, row: &[String; N]) -> std::io::Result<()>
    where
        O: std::io::Write
    {
        let mut first = true;

        for (col, value) in self.columns.iter().zip(row) {
            if !first {
                write!(output, " ")?;
            }

            first = false;

            col.write_value(value, output)?;
        }

        writeln!(output)
    }
}

pub fn write_file_status<O>(output: &mut O, name: &str, status: &FileStatus, options: &OutputOptions) -> std::io::Result<()>
where
    O: std::io::Write
{
    writeln!(output, "{} {}", status.file_type, name)?;
    writeln!(output, "mode: {} ({})", mode_string(status), status.permission)?;
    writeln!(output, "owner: {}:{}", status.owner, status.group)?;
    writeln!(output, "size: {}", bytes_to_unit(status.length, &options.size_format))?;

    if status.is_file() {
        writeln!(output, "replication: {}", status.replication)?;
        writeln!(output, "block size: {}", bytes_to_unit(status.block_size, &options.size_format))?;
    }

    if let Some(children) = status.children_num {
        writeln!(output, "children: {}", children)?;
    }

    if let Some(target) = &status.symlink {
        writeln!(output, "target: {}", target)?;
    }

    writeln!(output, "modified: {}", datetime_to_string(&status.modification_time, &options.ts_format))?;

    if status.is_file() {
        writeln!(output, "accessed: {}", datetime_to_string(&status.access_time, &options.ts_format))?;
    }

    Ok(())
}

pub fn write_content_summary<O>(output: &mut O, name: &str, summary: &ContentSummary, options: &OutputOptions) -> std::io::Result<()>
where
    O: std::io::Write
{
    writeln!(output, "{}", name)?;
    writeln!(output, "directories: {}", summary.directory_count)?;
    writeln!(output, "files: {}", summary.file_count)?;
    writeln!(output, "size: {}", bytes_to_unit(summary.length, &options.size_format))?;
    writeln!(output, "consumed: {}", bytes_to_unit(summary.space_consumed, &options.size_format))?;

    match summary.quota() {
        Some(quota) => writeln!(output, "quota: {}", quota)?,
        None => writeln!(output, "quota: none")?,
    }

    match summary.space_quota() {
        Some(quota) => writeln!(output, "space quota: {}", bytes_to_unit(quota, &options.size_format))?,
        None => writeln!(output, "space quota: none")?,
    }

    Ok(())
}

pub fn write_checksum<O>(output: &mut O, name: &str, checksum: &FileChecksum) -> std::io::Result<()>
where
    O: std::io::Write
{
    writeln!(output, "{} {} {}", checksum.algorithm, checksum.hex(), name)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn size_units() {
        assert_eq!(bytes_to_unit(512, &BaseSize::Base2), "512");
        assert_eq!(bytes_to_unit(1024, &BaseSize::Base2), "1Ki");
        assert_eq!(bytes_to_unit(1536, &BaseSize::Base2), "~1Ki");
        assert_eq!(bytes_to_unit(128 * MEBI, &BaseSize::Base2), "128Mi");
        assert_eq!(bytes_to_unit(24930, &BaseSize::Base10), "~24K");
        assert_eq!(bytes_to_unit(24930, &BaseSize::Raw), "24930");
    }

    #[test]
    fn table_widths() {
        let mut table = TextTable::with_columns([
            Column::left("name"),
            Column::right("size"),
        ]);

        table.add_row([String::from("a.patch"), String::from("24930")]);
        table.add_row([String::from("b"), String::from("0")]);

        let mut output = Vec::new();
        table.write(&mut output, true).expect("failed to write table");

        let text = String::from_utf8(output).expect("table is not utf-8");

        assert_eq!(text, "name     size\na.patch 24930\nb           0\n");
    }
}
