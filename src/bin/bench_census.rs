use life_census::*;

fn main() {
    // time the update and the census separately on random fields
    for n in [64, 256, 1024] {
        let grid = Grid::random(n, n, 0.2, Some(42)).unwrap();
        let mut engine = LifeEngine::new(grid);
        let gens = (1 << 22) / (n * n) as u64;

        let timer = std::time::Instant::now();
        engine.advance(gens);
        let elapsed_update = timer.elapsed();

        let timer = std::time::Instant::now();
        let mut entities = 0;
        for _ in 0..gens {
            entities += classify(engine.current()).total();
        }
        let elapsed_census = timer.elapsed();

        println!(
            "n={n}\tgens={gens}\tupdate={:.3}s\tcensus={:.3}s\tentities/gen={}\tpopulation={}\tbytes={}",
            elapsed_update.as_secs_f64(),
            elapsed_census.as_secs_f64(),
            entities / gens,
            engine.current().population(),
            engine.bytes_total()
        );
    }
}
