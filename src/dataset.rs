//! Diagnostic dataset access.
//!
//! Verbose searches open the first matched file and report the mean of the
//! requested variable at the first time step. Opening is abstracted behind
//! [`DatasetOpener`] so catalogs pointing at non-NetCDF stores can plug in
//! their own reader.

use crate::error::Result;

/// Name of the time dimension
pub const TIME_DIMENSION: &str = "time";

/// An open dataset
pub trait Dataset {
    /// Mean of `variable` at time index 0, ignoring missing values.
    ///
    /// Only the first time step is read. Variables without a time dimension
    /// are averaged as a whole. Packed data is unpacked with `scale_factor`
    /// and `add_offset` when present.
    fn first_step_mean(&self, variable: &str) -> Result<f64>;

    /// Release the dataset handle
    fn close(self: Box<Self>);
}

/// Opens datasets by URI
pub trait DatasetOpener {
    fn open(&self, uri: &str) -> Result<Box<dyn Dataset>>;
}

/// Mean of the finite values that are not one of `missing`
pub fn masked_mean(values: impl IntoIterator<Item = f64>, missing: &[f64]) -> f64 {
    let (sum, count) = values
        .into_iter()
        .filter(|v| v.is_finite() && !missing.contains(v))
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

#[cfg(feature = "netcdf")]
pub use self::nc::{NetcdfDataset, NetcdfOpener};

#[cfg(feature = "netcdf")]
mod nc {
    use netcdf::{Attribute, Extent, Variable as NetCDFVariable};
    use std::path::Path;
    use tracing::debug;

    use super::{masked_mean, Dataset, DatasetOpener, TIME_DIMENSION};
    use crate::error::{Cmip6Error, Result};

    /// Attributes whose values mark missing data
    const MISSING_VALUE_ATTRIBUTES: [&str; 2] = ["_FillValue", "missing_value"];

    const SCALE_FACTOR: &str = "scale_factor";
    const ADD_OFFSET: &str = "add_offset";

    /// Opens local NetCDF files
    #[derive(Debug, Clone, Copy, Default)]
    pub struct NetcdfOpener;

    impl DatasetOpener for NetcdfOpener {
        fn open(&self, uri: &str) -> Result<Box<dyn Dataset>> {
            let path = uri.strip_prefix("file://").unwrap_or(uri);
            if !Path::new(path).exists() {
                return Err(Cmip6Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                )));
            }

            let file = netcdf::open(path)?;
            debug!(uri = uri, "Opened NetCDF dataset");
            Ok(Box::new(NetcdfDataset {
                file,
                uri: uri.to_string(),
            }))
        }
    }

    /// A NetCDF file opened for diagnostics
    pub struct NetcdfDataset {
        file: netcdf::File,
        uri: String,
    }

    impl Dataset for NetcdfDataset {
        fn first_step_mean(&self, variable: &str) -> Result<f64> {
            let var = self
                .file
                .variable(variable)
                .ok_or_else(|| Cmip6Error::Dataset {
                    message: format!("Variable {} not found in {}", variable, self.uri),
                })?;

            let dimensions = var.dimensions();
            let time_axis = dimensions
                .iter()
                .position(|dim| dim.name() == TIME_DIMENSION);
            if let Some(axis) = time_axis {
                if dimensions[axis].len() == 0 {
                    return Ok(f64::NAN);
                }
            }

            // index 0 along time, everything along the other axes
            let extents: Vec<Extent> = (0..dimensions.len())
                .map(|axis| {
                    if Some(axis) == time_axis {
                        Extent::from(0usize..1)
                    } else {
                        Extent::from(..)
                    }
                })
                .collect();

            let values = read_values(&var, &extents)?;
            debug!(
                uri = %self.uri,
                variable = variable,
                values = values.len(),
                "Read first time step"
            );

            let missing = missing_values(&var)?;
            let mean = masked_mean(values, &missing);

            let scale = scalar_attribute(&var, SCALE_FACTOR)?.unwrap_or(1.0);
            let offset = scalar_attribute(&var, ADD_OFFSET)?.unwrap_or(0.0);
            Ok(mean * scale + offset)
        }

        fn close(self: Box<Self>) {
            debug!(uri = %self.uri, "Closing NetCDF dataset");
        }
    }

    /// Read the `extents` slab of a numeric variable as f64 values
    fn read_values(var: &NetCDFVariable, extents: &[Extent]) -> Result<Vec<f64>> {
        use netcdf::types::{BasicType, VariableType};

        match var.vartype() {
            VariableType::Basic(BasicType::Byte) => {
                let values: Vec<i8> = var.get_values::<i8, _>(extents)?;
                Ok(values.into_iter().map(f64::from).collect())
            }
            VariableType::Basic(BasicType::Short) => {
                let values: Vec<i16> = var.get_values::<i16, _>(extents)?;
                Ok(values.into_iter().map(f64::from).collect())
            }
            VariableType::Basic(BasicType::Int) => {
                let values: Vec<i32> = var.get_values::<i32, _>(extents)?;
                Ok(values.into_iter().map(f64::from).collect())
            }
            VariableType::Basic(BasicType::Float) => {
                let values: Vec<f32> = var.get_values::<f32, _>(extents)?;
                Ok(values.into_iter().map(f64::from).collect())
            }
            VariableType::Basic(BasicType::Double) => Ok(var.get_values::<f64, _>(extents)?),
            other => Err(Cmip6Error::Dataset {
                message: format!("Unsupported variable type: {:?}", other),
            }),
        }
    }

    /// Values flagged as missing through the variable's attributes
    fn missing_values(var: &NetCDFVariable) -> Result<Vec<f64>> {
        let mut missing = Vec::new();
        for name in MISSING_VALUE_ATTRIBUTES {
            if let Some(attr) = var.attribute(name) {
                missing.extend(numeric_attribute(&attr)?);
            }
        }
        Ok(missing)
    }

    /// First value of a numeric attribute, if the variable carries it
    fn scalar_attribute(var: &NetCDFVariable, name: &str) -> Result<Option<f64>> {
        match var.attribute(name) {
            Some(attr) => Ok(numeric_attribute(&attr)?.first().copied()),
            None => Ok(None),
        }
    }

    fn numeric_attribute(attr: &Attribute) -> Result<Vec<f64>> {
        use netcdf::AttributeValue as NcAttributeValue;

        let values = match attr.value()? {
            NcAttributeValue::Schar(v) => vec![f64::from(v)],
            NcAttributeValue::Short(v) => vec![f64::from(v)],
            NcAttributeValue::Int(v) => vec![f64::from(v)],
            NcAttributeValue::Float(v) => vec![f64::from(v)],
            NcAttributeValue::Double(v) => vec![v],
            NcAttributeValue::Floats(v) => v.into_iter().map(f64::from).collect(),
            NcAttributeValue::Doubles(v) => v,
            _ => Vec::new(),
        };
        Ok(values)
    }
}
