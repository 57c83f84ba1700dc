use super::*;
use arrow::array::{BooleanArray, Float64Array, Int64Array};
use arrow::datatypes::DataType;
use std::io::Cursor;
use tempfile::tempdir;

fn example_batch() -> RecordBatch {
    let schema = Schema::new(vec![
        Field::new("age", DataType::Int64, true),
        Field::new("city", DataType::Utf8, true),
    ]);
    RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(Int64Array::from(vec![Some(25), Some(30), None])),
            Arc::new(StringArray::from(vec![Some("NY"), Some("LA"), Some("NY")])),
        ],
    )
    .unwrap()
}

#[test]
fn test_encode_writes_header_and_sentinel() {
    let encoded = encode_table(&example_batch()).unwrap();
    let text = String::from_utf8(encoded).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines, vec!["age,city", "25,NY", "30,LA", "_GSK_NA_,NY"]);
}

#[test]
fn test_encode_quotes_delimiters() {
    let schema = Schema::new(vec![Field::new("text", DataType::Utf8, true)]);
    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![Arc::new(StringArray::from(vec!["a,b", "say \"hi\""]))],
    )
    .unwrap();

    let decoded = decode_table(Cursor::new(encode_table(&batch).unwrap())).unwrap();
    let text = decoded
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(text.value(0), "a,b");
    assert_eq!(text.value(1), "say \"hi\"");
}

#[test]
fn test_missing_and_empty_string_stay_distinct() {
    let schema = Schema::new(vec![
        Field::new("a", DataType::Utf8, true),
        Field::new("b", DataType::Utf8, true),
    ]);
    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(StringArray::from(vec![Some(""), None, Some("x")])),
            Arc::new(StringArray::from(vec![Some("1"), Some("2"), Some("3")])),
        ],
    )
    .unwrap();

    let decoded = decode_table(Cursor::new(encode_table(&batch).unwrap())).unwrap();
    let a = decoded
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();

    assert!(a.is_valid(0));
    assert_eq!(a.value(0), "");
    assert!(a.is_null(1));
    assert_eq!(a.value(2), "x");
}

#[test]
fn test_sentinel_collision_rejected() {
    let schema = Schema::new(vec![Field::new("a", DataType::Utf8, true)]);
    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![Arc::new(StringArray::from(vec!["ok", MISSING_VALUE_SENTINEL]))],
    )
    .unwrap();

    let err = encode_table(&batch).unwrap_err();
    match err {
        CodecError::SentinelCollision { column, row } => {
            assert_eq!(column, "a");
            assert_eq!(row, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_decode_infers_types() {
    let text = "i,f,b,s,all_missing\n1,1.5,true,x,_GSK_NA_\n_GSK_NA_,2,False,y,_GSK_NA_\n";
    let batch = decode_table(Cursor::new(text)).unwrap();

    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.column(0).data_type(), &DataType::Int64);
    assert_eq!(batch.column(1).data_type(), &DataType::Float64);
    assert_eq!(batch.column(2).data_type(), &DataType::Boolean);
    assert_eq!(batch.column(3).data_type(), &DataType::Utf8);
    assert_eq!(batch.column(4).data_type(), &DataType::Utf8);

    let i = batch.column(0).as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(i.value(0), 1);
    assert!(i.is_null(1));

    let f = batch.column(1).as_any().downcast_ref::<Float64Array>().unwrap();
    assert_eq!(f.value(1), 2.0);

    let b = batch.column(2).as_any().downcast_ref::<BooleanArray>().unwrap();
    assert!(b.value(0));
    assert!(!b.value(1));
}

#[test]
fn test_yes_no_text_not_inferred_as_boolean() {
    let batch = decode_table(Cursor::new("answer\nyes\nno\n")).unwrap();
    assert_eq!(batch.column(0).data_type(), &DataType::Utf8);
}

#[test]
fn test_empty_string_blocks_numeric_inference() {
    let batch = decode_table(Cursor::new("n,m\n1,a\n\"\",b\n")).unwrap();
    assert_eq!(batch.column(0).data_type(), &DataType::Utf8);
}

#[test]
fn test_ragged_rows_fail() {
    let result = decode_table(Cursor::new("a,b\n1,2\n3\n"));
    assert!(matches!(result, Err(CodecError::CsvError(_))));
}

#[test]
fn test_header_only_decodes_to_empty_table() {
    let batch = decode_table(Cursor::new("a,b\n")).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 2);
}

#[test]
fn test_compressed_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(DATA_FILE_NAME);
    let batch = example_batch();

    let sizes = write_compressed_table(&path, &batch, DEFAULT_COMPRESSION_LEVEL).unwrap();
    assert_eq!(sizes.original_bytes, encode_table(&batch).unwrap().len() as u64);
    assert_eq!(sizes.compressed_bytes, std::fs::metadata(&path).unwrap().len());

    let decoded = read_compressed_table(&path).unwrap();
    assert_eq!(decoded, batch);
}

#[test]
fn test_compression_shrinks_repetitive_data() {
    let schema = Schema::new(vec![Field::new("city", DataType::Utf8, true)]);
    let values: Vec<&str> = std::iter::repeat("New York").take(10_000).collect();
    let batch =
        RecordBatch::try_new(Arc::new(schema), vec![Arc::new(StringArray::from(values))]).unwrap();

    let encoded = encode_table(&batch).unwrap();
    let compressed = compress(&encoded, DEFAULT_COMPRESSION_LEVEL).unwrap();
    assert!(compressed.len() * 10 < encoded.len());

    let mut restored = Vec::new();
    decompressing_reader(Cursor::new(compressed))
        .unwrap()
        .read_to_end(&mut restored)
        .unwrap();
    assert_eq!(restored, encoded);
}

#[test]
fn test_compression_ratio() {
    let sizes = EncodedSizes {
        original_bytes: 100,
        compressed_bytes: 25,
    };
    assert_eq!(sizes.compression_ratio(), 4.0);
    assert_eq!(EncodedSizes::default().compression_ratio(), 0.0);
}

#[test]
fn test_decode_without_inference_keeps_text() {
    let batch = decode_table_with(Cursor::new("code,n\n007,1\n042,2\n"), |name| name != "code").unwrap();

    let code = batch.column(0).as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(code.value(0), "007");
    assert_eq!(batch.column(1).data_type(), &DataType::Int64);
}
