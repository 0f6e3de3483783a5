use std::fmt::{Formatter, Display, Result as FmtResult};
use std::default::Default;

use clap::ValueEnum;
use cloudbridge_lib::Resource;
use cloudbridge_lib::date::DisplayDate;

#[derive(Debug)]
pub struct SizeType<T = u64> {
    pub value: T,
    pub unit: &'static str,
}

pub const KIBI: u64 = 1024;
pub const MEBI: u64 = KIBI * 1024;
pub const GIBI: u64 = MEBI * 1024;
pub const TEBI: u64 = GIBI * 1024;

pub const BASE_2_SIZE: [SizeType; 4] = [
    SizeType {
        value: TEBI,
        unit: "Ti",
    },
    SizeType {
        value: GIBI,
        unit: "Gi",
    },
    SizeType {
        value: MEBI,
        unit: "Mi",
    },
    SizeType {
        value: KIBI,
        unit: "Ki",
    },
];

pub const KILO: u64 = 1000;
pub const MEGA: u64 = KILO * 1000;
pub const GIGA: u64 = MEGA * 1000;
pub const TERA: u64 = GIGA * 1000;

pub const BASE_10_SIZE: [SizeType; 4] = [
    SizeType {
        value: TERA,
        unit: "T",
    },
    SizeType {
        value: GIGA,
        unit: "G",
    },
    SizeType {
        value: MEGA,
        unit: "M",
    },
    SizeType {
        value: KILO,
        unit: "K",
    },
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

pub fn value_to_unit(size: u64, base: &BaseSize, suffix: &str) -> String {
    let list = match base {
        BaseSize::Base2 => BASE_2_SIZE,
        BaseSize::Base10 => BASE_10_SIZE,
        BaseSize::Raw => {
            return format!("{size}{suffix}");
        }
    };

    for base in list {
        if size >= base.value {
            let output_size = size / base.value;

            if size % base.value == 0 {
                return format!("{output_size}{}{suffix}", base.unit);
            } else {
                return format!("~{output_size}{}{suffix}", base.unit);
            }
        }
    }

    format!("{size}{suffix}")
}

pub fn bytes_to_unit(size: u64, base: &BaseSize) -> String {
    value_to_unit(size, base, "B")
}

pub struct Column {
    name: String,
    width: usize,
}

impl Column {
    pub fn new<N>(name: N) -> Column
    where
        N: Into<String>,
    {
        let name = name.into();
        let width = name.chars().count();

        Column { name, width }
    }

    pub fn write_value<D, O>(&self, value: &D, output: &mut O) -> std::io::Result<()>
    where
        D: Display + ?Sized,
        O: std::io::Write,
    {
        write!(output, "{value:<width$}", width=self.width)
    }

    pub fn write_header<O>(&self, output: &mut O) -> std::io::Result<()>
    where
        O: std::io::Write
    {
        self.write_value(&self.name, output)
    }

    pub fn update_width(&mut self, width: usize) -> bool {
        if width > self.width {
            self.width = width;
            true
        } else {
            false
        }
    }
}

pub struct HeaderSep {
    pub ch: char,
    pub col_sep: &'static str,
}

pub struct TableOptions {
    pub col_sep: &'static str,
    pub header_sep: Option<HeaderSep>,
}

pub const PRETTY_OPTIONS: TableOptions = TableOptions {
    col_sep: " | ",
    header_sep: Some(HeaderSep {
        ch: '-',
        col_sep: "-+-",
    })
};

/// writes the rows under a header line, each row prefixed with its 1 based
/// index. missing values are written as empty cells
pub fn write_table<O, const N: usize>(
    output: &mut O,
    rows: &[[Option<String>; N]],
    columns: &[Column; N],
    options: &TableOptions,
) -> std::io::Result<()>
where
    O: std::io::Write,
{
    let empty = "";
    let total = rows.len();
    let index_width = (total.checked_ilog10().unwrap_or(0) + 1) as usize;

    write!(output, "{empty:index_width$}")?;

    for col in columns {
        write!(output, "{}", options.col_sep)?;

        col.write_header(output)?;
    }

    if let Some(header_sep) = &options.header_sep {
        write!(output, "\n")?;

        for _ in 0..index_width {
            write!(output, "{}", header_sep.ch)?;
        }

        for col in columns {
            write!(output, "{}", header_sep.col_sep)?;

            for _ in 0..col.width {
                write!(output, "{}", header_sep.ch)?;
            }
        }
    }

    write!(output, "\n")?;

    for (index, row) in rows.iter().enumerate() {
        write!(output, "{:>index_width$}", index + 1)?;

        for (col, value) in columns.iter().zip(row) {
            write!(output, "{}", options.col_sep)?;

            if let Some(st) = value {
                col.write_value(st, output)?;
            } else {
                col.write_value(empty, output)?;
            }
        }

        write!(output, "\n")?;
    }

    Ok(())
}

pub struct TextTable<const N: usize> {
    columns: [Column; N],
    rows: Vec<[Option<String>; N]>
}

pub struct TextRow<'a, const N: usize> {
    table: &'a mut TextTable<N>,
    row: [Option<String>; N],
}

impl<'a, const N: usize> TextRow<'a, N> {
    pub fn set_col<V>(&mut self, index: usize, value: V) -> bool
    where
        V: Display
    {
        if index >= N {
            false
        } else {
            self.row[index] = Some(value.to_string());
            true
        }
    }

    pub fn finish(mut self) {
        for (value, col) in self.row.iter().zip(&mut self.table.columns) {
            if let Some(st) = &value {
                col.update_width(st.chars().count());
            }
        }

        self.table.rows.push(self.row);
    }
}

impl<const N: usize> TextTable<N> {
    pub fn with_columns(columns: [Column; N]) -> Self {
        TextTable {
            columns,
            rows: Vec::new()
        }
    }

    pub fn add_row(&mut self) -> TextRow<'_, N> {
        TextRow {
            table: self,
            row: std::array::from_fn(|_| None),
        }
    }

    pub fn write<O>(&self, output: &mut O, options: &TableOptions) -> std::io::Result<()>
    where
        O: std::io::Write
    {
        write_table(output, &self.rows, &self.columns, options)
    }
}

/// writes every known field of a resource, one per line
pub fn write_resource<O>(
    output: &mut O,
    resource: &Resource,
    display: &DisplayDate,
    size_format: &BaseSize,
) -> std::io::Result<()>
where
    O: std::io::Write
{
    write!(output, "resource {}\n", resource.id.as_deref().unwrap_or("-"))?;
    write!(output, "name: {}\n", resource.file_name)?;
    write!(output, "type: {}\n", resource.file_type)?;
    write!(output, "storage: {}\n", resource.file_storage)?;

    if let Some(size) = resource.file_size {
        write!(output, "size: {}\n", bytes_to_unit(size, size_format))?;
    }

    if let Some(owner) = &resource.file_owner {
        write!(output, "owner: {owner}\n")?;
    }

    // a rejected timestamp is shown as given rather than dropped
    for (label, value) in [
        ("inserted", &resource.date_inserted),
        ("modified", &resource.date_modified),
    ] {
        let Some(given) = value else {
            continue;
        };

        match display.format(Some(given.as_str())) {
            Ok(Some(formatted)) => write!(output, "{label}: {formatted}\n")?,
            Ok(None) => {},
            Err(_) => write!(output, "{label}: {given}\n")?,
        }
    }

    if let Some(description) = &resource.file_description {
        write!(output, "description: {description}\n")?;
    }

    Ok(())
}
