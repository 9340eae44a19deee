//! Builds values from native collections and prints their serialized form.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example types
//! ```

use anyhow::Result;
use cjson_core::Json;

fn main() -> Result<()> {
    env_logger::init();

    let vector_json = Json::from(vec![1, 1, 2, 3, 5, 8]);
    println!("vectorJson:\n{}", vector_json.try_serialize()?);

    let list_json = Json::from(["yep", "foo", "bar"]);
    println!("listJson:\n{}", list_json.try_serialize()?);

    let complex_list = Json::from([Json::from(["a", "b", "c"]), Json::from(["a", "b", "c"])]);
    println!("complex Json:\n{}", complex_list.try_serialize()?);

    let mut reparsed = Json::new();
    reparsed.parse(&complex_list.serialize())?;
    println!("reparsed equal: {}", reparsed == complex_list);

    Ok(())
}
