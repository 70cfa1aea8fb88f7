//! Canned lyric templates.

const POP_LYRICS: &str = "Verse 1:\nDancing through the city lights tonight\nEverything's gonna be alright\nMusic pumping, hearts are beating fast\nThis moment's gonna last\n\nChorus:\nWe're unstoppable, unbreakable\nReaching for the stars above\nNothing's gonna stop us now\nThis is what we're dreaming of";

const JAZZ_LYRICS: &str = "Verse 1:\nSmoky room, piano keys so sweet\nRhythm makes my heart skip a beat\nSax is playing melodies so blue\nAll I need is me and you\n\nChorus:\nIn this jazzy state of mind\nLeave our worries far behind\nLet the music take control\nJazz will heal your weary soul";

const DEFAULT_LYRICS: &str = "Verse 1:\nWords flowing like a river deep\nMelodies that make you weep\nEvery note tells a story true\nThis song was made for you\n\nChorus:\nSing along, feel the beat\nLife's a symphony so sweet\nEvery moment, every rhyme\nMusic transcends space and time";

/// Returns lyrics for a genre (case-insensitive exact match), falling back to
/// a generic template.
pub fn generate_lyrics(genre: &str) -> &'static str {
    match genre.to_lowercase().as_str() {
        "pop" => POP_LYRICS,
        "jazz" => JAZZ_LYRICS,
        _ => DEFAULT_LYRICS,
    }
}
