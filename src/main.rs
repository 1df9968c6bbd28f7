use long_map::LongMap;
use std::collections::HashSet;

fn print_state(map: &LongMap<&str>) {
    let distinct: HashSet<i64> = map.keys().into_iter().collect();

    println!("{}", map.len());
    println!("Keys: {:?}", map.keys());
    println!("Values: {:?}", map.values());
    println!("set size: {}", distinct.len());
}

fn main() -> Result<(), long_map::Error> {
    env_logger::init(); // Set `RUST_LOG=debug` to see the table resizing.

    let mut map = LongMap::with_capacity_and_shrink(16, true)?;
    for key in 0..250 {
        map.put(key, "s");
    }
    for key in 0..10 {
        map.put(key, "f");
    }
    print_state(&map);

    for key in 0..10 {
        map.remove(key);
    }
    print_state(&map);

    Ok(())
}
