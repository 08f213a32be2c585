//! Built-in word list for memorable passwords.
//!
//! Common lowercase English words, 3 to 10 letters, no duplicates.

pub const WORDS: &[&str] = &[
    "able", "acid", "acorn", "actor", "adapt", "admit", "adobe", "agent", "alarm", "album", "alley",
    "almond", "amber", "anchor", "angle", "ankle", "apple", "apron", "arena", "armor", "arrow",
    "artist", "aspen", "atlas", "attic", "autumn", "avocado", "badge", "bagel", "baker", "bamboo",
    "banana", "banjo", "barley", "barrel", "basil", "basket", "beacon", "beaver", "bench", "berry",
    "bicycle", "bishop", "blanket", "blossom", "board", "bonnet", "border", "bottle", "boulder",
    "branch", "breeze", "brick", "bridge", "bronze", "brook", "bucket", "buffalo", "bundle",
    "butter", "cabin", "cactus", "camel", "canal", "candle", "canoe", "canvas", "canyon", "carbon",
    "cargo", "carpet", "carrot", "castle", "cedar", "cellar", "chalk", "channel", "cherry", "chess",
    "chimney", "cider", "circle", "citrus", "clever", "cliff", "clock", "cloud", "clover", "cobalt",
    "coconut", "comet", "compass", "copper", "coral", "cotton", "cougar", "cradle", "crane",
    "crater", "crayon", "cricket", "crystal", "cupboard", "curtain", "cushion", "daisy", "dancer",
    "delta", "desert", "diamond", "dinner", "dolphin", "donkey", "dragon", "drawer", "dream",
    "drum", "eagle", "echo", "eclipse", "elbow", "elder", "ember", "emerald", "engine", "falcon",
    "fabric", "feather", "fence", "fern", "fiddle", "field", "figure", "finch", "flame", "flute",
    "forest", "fossil", "fountain", "fox", "galaxy", "garden", "garlic", "gazelle", "gecko",
    "ginger", "glacier", "globe", "goblet", "granite", "grape", "gravel", "guitar", "hammer",
    "harbor", "harvest", "hazel", "helmet", "heron", "hickory", "hollow", "honey", "horizon",
    "hornet", "igloo", "indigo", "island", "ivory", "jacket", "jaguar", "jasmine", "jelly",
    "jigsaw", "journal", "juniper", "kayak", "kernel", "kettle", "kitten", "koala", "ladder",
    "lagoon", "lantern", "laptop", "lemon", "lentil", "library", "lily", "linen", "lizard",
    "lobster", "locket", "lotus", "lumber", "magnet", "mango", "maple", "marble", "meadow", "melon",
    "mercury", "meteor", "mirror", "mitten", "monsoon", "mosaic", "mountain", "muffin", "museum",
    "mustard", "napkin", "nectar", "needle", "nickel", "noodle", "nutmeg", "oasis", "ocean",
    "olive", "onion", "orbit", "orchard", "orchid", "otter", "oyster", "paddle", "palace", "panda",
    "panther", "paper", "parrot", "pasta", "peach", "pebble", "pelican", "pepper", "piano",
    "pickle", "pigeon", "pillow", "pine", "planet", "plum", "pocket", "polar", "pony", "poppy",
    "potato", "prairie", "pretzel", "prism", "pumpkin", "puzzle", "quartz", "quill", "quilt",
    "rabbit", "radar", "radish", "raft", "rain", "raven", "record", "reef", "ribbon", "river",
    "robin", "rocket", "saddle", "saffron", "salmon", "sandal", "satchel", "saturn", "scarf",
    "scooter", "shadow", "shell", "shovel", "signal", "silver", "sketch", "sled", "slipper",
    "snail", "socket", "sparrow", "spider", "spinach", "sponge", "spruce", "squash", "staple",
    "statue", "stone", "stream", "sugar", "summit", "sunset", "swan", "table", "tablet", "tango",
    "teapot", "temple", "thimble", "thistle", "thunder", "ticket", "tiger", "timber", "toast",
    "tomato", "topaz", "torch", "tortoise", "tower", "trail", "trumpet", "tulip", "tundra",
    "tunnel", "turnip", "turtle", "umbrella", "unicorn", "valley", "vanilla", "velvet", "violet",
    "violin", "volcano", "voyage", "waffle", "walnut", "walrus", "wander", "whale", "wheat",
    "whistle", "willow", "window", "winter", "wizard", "wombat", "wool", "yacht", "yarrow",
    "yogurt", "zebra", "zenith", "zephyr", "zigzag", "zinc", "zipper",
];
