use vitae_types::Script;

/// A maximal substring whose codepoints share one script classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    pub script: Script,
    pub text: String,
}

/// Splits `text` into ordered script runs.
///
/// Pure and O(n); concatenating the run texts reproduces the input
/// exactly, codepoint for codepoint.
pub fn segment(text: &str) -> Vec<ScriptRun> {
    let mut runs: Vec<ScriptRun> = Vec::new();
    for c in text.chars() {
        let script = Script::of(c);
        match runs.last_mut() {
            Some(run) if run.script == script => run.text.push(c),
            _ => runs.push(ScriptRun { script, text: c.to_string() }),
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(runs: &[ScriptRun]) -> String {
        runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn round_trips_mixed_text() {
        let samples = [
            "",
            "plain latin",
            "项目经理",
            "Worked on 分布式系统 at Acme",
            "カタカナとひらがな",
            "한국어 텍스트 with latin",
            "digits 2020 年",
        ];
        for s in samples {
            assert_eq!(concat(&segment(s)), s, "round trip failed for {s:?}");
        }
    }

    #[test]
    fn merges_adjacent_same_script_codepoints() {
        let runs = segment("abc你好def");
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], ScriptRun { script: Script::Latin, text: "abc".into() });
        assert_eq!(runs[1], ScriptRun { script: Script::Cjk, text: "你好".into() });
        assert_eq!(runs[2], ScriptRun { script: Script::Latin, text: "def".into() });
    }

    #[test]
    fn kana_and_hangul_get_their_own_runs() {
        let runs = segment("あ한永");
        let scripts: Vec<Script> = runs.iter().map(|r| r.script).collect();
        assert_eq!(scripts, vec![Script::Kana, Script::Hangul, Script::Cjk]);
    }

    #[test]
    fn empty_input_yields_no_runs() {
        assert!(segment("").is_empty());
    }
}
