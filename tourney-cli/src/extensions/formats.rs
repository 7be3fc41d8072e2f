//! Problem readers: a subset of TSPLIB95 format and a plain list of coordinates.

#[cfg(test)]
#[path = "../../tests/unit/extensions/formats_test.rs"]
mod formats_test;

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tourney::models::{Coordinate, ProblemInstance};
use tourney::utils::{Float, GenericError, GenericResult};

/// A trait to read TSPLIB95 problem. Only `NODE_COORD_SECTION` with `EUC_2D` coordinates is supported.
pub trait TsplibProblem {
    /// Reads TSPLIB95 problem. The name is used when the file has no `NAME` entry.
    fn read_tsplib(self, default_name: &str) -> GenericResult<ProblemInstance>;
}

impl<R: Read> TsplibProblem for BufReader<R> {
    fn read_tsplib(self, default_name: &str) -> GenericResult<ProblemInstance> {
        TsplibReader::new(self).read_problem(default_name)
    }
}

impl TsplibProblem for String {
    fn read_tsplib(self, default_name: &str) -> GenericResult<ProblemInstance> {
        TsplibReader::new(BufReader::new(self.as_bytes())).read_problem(default_name)
    }
}

/// A trait to read a problem defined as `x y` coordinate pairs, one city per line. Empty lines
/// and lines starting with `#` are ignored.
pub trait PlainProblem {
    /// Reads plain problem with given name.
    fn read_plain(self, name: &str) -> GenericResult<ProblemInstance>;
}

impl<R: Read> PlainProblem for BufReader<R> {
    fn read_plain(self, name: &str) -> GenericResult<ProblemInstance> {
        let coordinates = self
            .lines()
            .enumerate()
            .map(|(idx, line)| line.map(|line| (idx + 1, line)))
            .filter(|line| line.as_ref().map_or(true, |(_, line)| !is_skipped(line)))
            .map(|line| -> GenericResult<Coordinate> {
                let (line_number, line) = line?;
                match line.split_whitespace().collect::<Vec<_>>().as_slice() {
                    [x, y] => Ok(Coordinate::new(
                        parse_float(x, format!("cannot parse x at line {line_number}").as_str())?,
                        parse_float(y, format!("cannot parse y at line {line_number}").as_str())?,
                    )),
                    _ => Err(format!("expected 'x y' at line {line_number}, got: '{}'", line.trim()).into()),
                }
            })
            .collect::<GenericResult<Vec<_>>>()?;

        ProblemInstance::new(name, coordinates)
    }
}

impl PlainProblem for String {
    fn read_plain(self, name: &str) -> GenericResult<ProblemInstance> {
        BufReader::new(self.as_bytes()).read_plain(name)
    }
}

/// Reads problem from the file detecting its format by content: TSPLIB95 files have a
/// `NODE_COORD_SECTION`, everything else is read as plain coordinates. The file stem is used as
/// a default problem name.
pub fn read_problem_file(path: &Path) -> GenericResult<ProblemInstance> {
    let mut content = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut content))
        .map_err(|err| format!("cannot read problem file '{}': '{err}'", path.display()))?;

    let name = path.file_stem().map(|stem| stem.to_string_lossy().to_string()).unwrap_or_else(|| "problem".to_string());

    if content.lines().any(|line| line.trim() == "NODE_COORD_SECTION") {
        content.read_tsplib(name.as_str())
    } else {
        content.read_plain(name.as_str())
    }
}

struct TsplibReader<R: Read> {
    buffer: String,
    reader: BufReader<R>,
    name: Option<String>,
    dimension: Option<usize>,
}

impl<R: Read> TsplibReader<R> {
    fn new(reader: BufReader<R>) -> Self {
        Self { buffer: String::new(), reader, name: None, dimension: None }
    }

    fn read_problem(&mut self, default_name: &str) -> GenericResult<ProblemInstance> {
        self.read_meta()?;
        let coordinates = self.read_coordinates()?;
        self.read_tail()?;

        let name = self.name.take().unwrap_or_else(|| default_name.to_string());

        ProblemInstance::new(name, coordinates)
    }

    fn read_meta(&mut self) -> GenericResult<()> {
        loop {
            let line = self.read_line()?.trim().to_string();

            if line == "NODE_COORD_SECTION" {
                break;
            }

            if line.is_empty() {
                continue;
            }

            let (key, value) = split_key_value(line.as_str())?;
            match key {
                "NAME" => self.name = Some(value.to_string()),
                "TYPE" if value != "TSP" => return Err(format!("expecting 'TSP' as TYPE, got '{value}'").into()),
                "DIMENSION" => self.dimension = Some(parse_int(value, "cannot parse DIMENSION")?),
                "EDGE_WEIGHT_TYPE" if value != "EUC_2D" => {
                    return Err(format!("expecting 'EUC_2D' as EDGE_WEIGHT_TYPE, got '{value}'").into());
                }
                _ => {}
            }
        }

        if self.dimension.is_none() {
            return Err("DIMENSION is not specified".into());
        }

        Ok(())
    }

    fn read_coordinates(&mut self) -> GenericResult<Vec<Coordinate>> {
        let dimension = self.dimension.ok_or_else(|| GenericError::from("DIMENSION is not specified"))?;

        (1..=dimension)
            .map(|expected_id| -> GenericResult<Coordinate> {
                let line = self.read_line()?.trim();
                let data = line.split_whitespace().collect::<Vec<_>>();

                if data.len() != 3 {
                    return Err(format!("unexpected coord data: '{line}'").into());
                }

                let id = parse_int(data[0], "cannot parse id")?;
                if id != expected_id {
                    return Err(format!("expecting node id {expected_id}, got {id}").into());
                }

                Ok(Coordinate::new(parse_float(data[1], "cannot parse coord.0")?, parse_float(data[2], "cannot parse coord.1")?))
            })
            .collect()
    }

    fn read_tail(&mut self) -> GenericResult<()> {
        loop {
            if self.read_line_or_eof()? == 0 {
                return Ok(());
            }

            match self.buffer.trim() {
                "" | "EOF" => {}
                line => return Err(format!("expecting EOF, got: '{line}'").into()),
            }
        }
    }

    fn read_line(&mut self) -> GenericResult<&String> {
        if self.read_line_or_eof()? == 0 {
            return Err("unexpected end of file".into());
        }

        Ok(&self.buffer)
    }

    fn read_line_or_eof(&mut self) -> GenericResult<usize> {
        self.buffer.clear();
        self.reader.read_line(&mut self.buffer).map_err(|err| err.to_string().into())
    }
}

fn split_key_value(line: &str) -> GenericResult<(&str, &str)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
        .ok_or_else(|| format!("expected colon separated string, got: '{line}'").into())
}

fn parse_float(data: &str, err_msg: &str) -> GenericResult<Float> {
    data.parse::<Float>().map_err(|err| format!("{err_msg}: '{err}'").into())
}

fn parse_int(data: &str, err_msg: &str) -> GenericResult<usize> {
    data.parse::<usize>().map_err(|err| format!("{err_msg}: '{err}'").into())
}

fn is_skipped(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}
