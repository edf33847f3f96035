//! Built-in creature roster and skin availability

/// Every creature that can occupy a team slot, in roster order
pub const CREATURES: &[&str] = &[
    "Cubzero",
    "Aroara",
    "Bearealis",
    "Toruga",
    "Embaval",
    "Volcadon",
    "Nibblegar",
    "Sheartooth",
    "Megalobite",
    "Swurmy",
    "Beezel",
    "Humbee",
    "Silquill",
    "Gildwing",
    "Golbeak",
    "Slitherpin",
    "Serpike",
    "Houndos",
    "Hountrion",
    "Armado",
    "Armadil",
    "Armadon",
    "Sanscale",
    "Caradune",
    "Bittybolt",
    "Toravolt",
    "Bloby",
    "Molteye",
    "Ashclops",
    "Fiddly",
    "Ucaclaw",
    "Moffel",
    "Digmow",
    "Dugterra",
    "Buzzlet",
    "Bazzer",
    "Rhynobuz",
    "Lunarpup",
    "Lunarwulf",
    "Eclyptor",
    "Kryo",
    "Krypeek",
    "Krybeest",
    "Bren",
    "Pyrochick",
    "Infinix",
    "Acie",
    "Deecie",
    "Kyreptil",
    "Kyraptor",
    "Gella",
    "Gellish",
    "Gelaquad",
    "Skarbone",
    "Skuldra",
    "Skelatops",
    "Droople",
    "Mudma",
    "Arcta",
    "Arcturos",
    "Seraphace",
    "Grimmask",
    "Squidma",
    "Magmilus",
    "Lumon",
    "Lampyre",
    "Lumasect",
    "Patterbit",
    "Pitterbyte",
    "Cyberite",
    "Decibite",
    "Centilla",
    "Millidont",
    "Taddle",
    "Fibio",
    "Chonktoad",
    "Tinshel",
    "Dunpod",
    "Sandril",
    "Blizzburd",
    "Blizzian",
    "Purrgy",
    "Ghinx",
    "Purrghast",
    "Gauslime",
    "Magnamire",
    "Quagoo",
    "Swampa",
    "Squidly",
    "Octotle",
    "Ruptius",
    "Vulbrute",
    "Mooby",
    "Molbash",
    "Malavite",
    "Flowish",
    "Daricara",
    "Mino",
    "Blazitaur",
    "Frova",
    "Froshell",
    "Glamoth",
    "Otogy",
    "Orotchy",
    "Shimshell",
    "Atlantern",
    "Lemobi",
    "Makinja",
    "Glacikid",
    "Arctiram",
];

/// Cosmetic skins known to the sprite corpus
pub const SKINS: &[&str] = &[
    "Crimsonite",
    "Retro",
    "Dino",
    "Chunky",
    "Robot",
    "Steampunk",
    "Galactic",
];

/// Skins shipped for each creature when no scan data is available.
/// Creatures not listed only have the default look.
pub const SKIN_AVAILABILITY: &[(&str, &[&str])] = &[
    ("Nibblegar", &["Chunky"]),
    ("Sheartooth", &["Chunky"]),
    ("Megalobite", &["Chunky"]),
    ("Swurmy", &["Dino"]),
    ("Beezel", &["Dino"]),
    ("Humbee", &["Dino"]),
    ("Silquill", &["Retro"]),
    ("Gildwing", &["Retro"]),
    ("Golbeak", &["Retro"]),
    ("Slitherpin", &["Robot"]),
    ("Serpike", &["Robot"]),
    ("Houndos", &["Steampunk"]),
    ("Hountrion", &["Steampunk"]),
    ("Armado", &["Galactic"]),
    ("Armadil", &["Galactic"]),
    ("Armadon", &["Galactic"]),
    ("Ucaclaw", &["Crimsonite"]),
    ("Arcta", &["Crimsonite"]),
    ("Arcturos", &["Crimsonite"]),
    ("Magmilus", &["Crimsonite"]),
    ("Decibite", &["Crimsonite"]),
    ("Centilla", &["Crimsonite"]),
];
