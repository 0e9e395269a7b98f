//! Plain nullable string column (`"string"` type).

use std::any::Any;
use std::sync::Arc;

use occ_core::error::{IndexError, OccError, TypeError};
use occ_core::store::MISSING_INDEX;
use occ_core::traits::ColumnArray;

/// Type name under which the plain string column is registered.
pub const STRING_TYPE_NAME: &str = "string";

/// Column of optional strings.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StringColumn {
    values: Arc<[Option<String>]>,
}

impl StringColumn {
    /// Builds a column with no missing values.
    pub fn from_sequence<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(|s| Some(s.into())).collect(),
        }
    }

    /// Builds a column from optional values.
    pub fn from_options(values: Vec<Option<String>>) -> Self {
        Self {
            values: values.into(),
        }
    }

    /// Returns the values.
    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }
}

impl ColumnArray for StringColumn {
    fn type_name(&self) -> &'static str {
        STRING_TYPE_NAME
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn nbytes(&self) -> usize {
        self.values.len() * std::mem::size_of::<Option<String>>()
            + self
                .values
                .iter()
                .map(|v| v.as_ref().map_or(0, String::len))
                .sum::<usize>()
    }

    fn element_at(&self, i: usize) -> Result<Option<String>, OccError> {
        self.values
            .get(i)
            .cloned()
            .ok_or_else(|| {
                IndexError::OutOfBounds {
                    index: i as i64,
                    len: self.values.len(),
                }
                .into()
            })
    }

    fn slice_array(&self, start: usize, end: usize) -> Result<Arc<dyn ColumnArray>, OccError> {
        let len = self.values.len();
        if start > end || end > len {
            return Err(IndexError::InvalidSlice { start, end, len }.into());
        }
        Ok(Arc::new(Self::from_options(self.values[start..end].to_vec())))
    }

    fn is_null_mask(&self) -> Vec<bool> {
        self.values.iter().map(Option::is_none).collect()
    }

    fn copy_array(&self, deep: bool) -> Arc<dyn ColumnArray> {
        if deep {
            Arc::new(Self::from_options(self.values.to_vec()))
        } else {
            Arc::new(self.clone())
        }
    }

    fn concat_arrays(
        &self,
        others: &[Arc<dyn ColumnArray>],
    ) -> Result<Arc<dyn ColumnArray>, OccError> {
        let mut values = self.values.to_vec();
        for other in others {
            let column = other
                .as_any()
                .downcast_ref::<StringColumn>()
                .ok_or_else(|| TypeError::Mismatch {
                    expected: STRING_TYPE_NAME.to_string(),
                    found: other.type_name().to_string(),
                })?;
            values.extend_from_slice(&column.values);
        }
        Ok(Arc::new(Self::from_options(values)))
    }

    fn take_array(
        &self,
        indices: &[i64],
        allow_fill: bool,
        fill_value: Option<&str>,
    ) -> Result<Arc<dyn ColumnArray>, OccError> {
        let len = self.values.len();
        let values = indices
            .iter()
            .enumerate()
            .map(|(position, &index)| {
                if index == MISSING_INDEX {
                    return if allow_fill {
                        Ok(fill_value.map(str::to_string))
                    } else {
                        Err(IndexError::MissingIndex { position })
                    };
                }
                usize::try_from(index)
                    .ok()
                    .and_then(|i| self.values.get(i).cloned())
                    .ok_or(IndexError::OutOfBounds { index, len })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Arc::new(Self::from_options(values)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nulls_and_elements() {
        let column = StringColumn::from_options(vec![Some("a".to_string()), None]);
        assert_eq!(column.len(), 2);
        assert_eq!(column.is_null_mask(), vec![false, true]);
        assert_eq!(column.element_at(0).unwrap(), Some("a".to_string()));
        assert_eq!(column.element_at(1).unwrap(), None);
        assert!(column.element_at(2).is_err());
    }

    #[test]
    fn test_take_and_concat() {
        let column = StringColumn::from_sequence(["a", "b"]);
        let taken = column.take_array(&[1, -1], true, Some("z")).unwrap();
        assert_eq!(taken.element_at(1).unwrap(), Some("z".to_string()));

        let joined = column.concat_arrays(&[taken]).unwrap();
        assert_eq!(joined.len(), 4);
        assert!(column.take_array(&[-1], false, None).is_err());
    }
}
