use coach::presets;

pub(crate) fn run() {
    for scenario in presets::SCENARIOS {
        println!("{} ({})", scenario.title, scenario.description);

        for persona in presets::personas_for(scenario.id) {
            println!("  {:<22} {} — {}", persona.id, persona.title, persona.description);
        }

        println!();
    }
}
