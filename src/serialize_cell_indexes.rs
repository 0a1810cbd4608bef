use h3o::CellIndex;
use serde::Deserialize;

// Cell ids travel as lowercase hex strings, the form users paste and copy.

pub fn serialize_cell_indexes<S>(cells: &Vec<CellIndex>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(cells.len()))?;
    for cell in cells {
        seq.serialize_element(&cell.to_string())?;
    }
    seq.end()
}

pub fn deserialize_cell_indexes<'de, D>(deserializer: D) -> Result<Vec<CellIndex>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw_cells = Vec::<String>::deserialize(deserializer)?;
    raw_cells
        .iter()
        .map(|raw| raw.parse::<CellIndex>().map_err(serde::de::Error::custom))
        .collect()
}

pub fn serialize_cell_index<S>(cell: &CellIndex, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&cell.to_string())
}

pub fn deserialize_cell_index<'de, D>(deserializer: D) -> Result<CellIndex, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse::<CellIndex>().map_err(serde::de::Error::custom)
}

pub fn serialize_parent<S>(parent: &Option<CellIndex>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match parent {
        Some(cell) => serializer.serialize_some(&cell.to_string()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize_parent<'de, D>(deserializer: D) -> Result<Option<CellIndex>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.map(|s| s.parse::<CellIndex>().map_err(serde::de::Error::custom))
        .transpose()
}
