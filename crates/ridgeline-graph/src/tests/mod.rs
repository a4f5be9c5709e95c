//! Unit tests for the ridgeline-graph crate.

mod indent_tests {
    use rstest::rstest;

    use crate::{GraphError, IndentUnit};

    #[rstest]
    #[case("def a():", 0)]
    #[case("    pass", 1)]
    #[case("        return 1", 2)]
    #[case("      odd", 1)]
    #[case("\tpass", 0)]
    fn depth_counts_whole_units(#[case] line: &str, #[case] expected: usize) {
        assert_eq!(IndentUnit::spaces(4).depth(line), expected);
    }

    #[test]
    fn tab_units_count_tabs() {
        assert_eq!(IndentUnit::tab().depth("\t\t\tx"), 3);
    }

    #[test]
    fn detect_prefers_candidate_order() {
        let texts = ["fn a() {\n\tb();\n}\n", "def a():\n    pass\n"];
        let unit = IndentUnit::detect(&IndentUnit::default_candidates(), &texts)
            .unwrap_or_else(|err| panic!("detect: {err}"));
        assert_eq!(unit, IndentUnit::spaces(4));
    }

    #[test]
    fn detect_falls_back_to_later_candidates() {
        let texts = ["fn a() {\n\tb();\n}\n"];
        let unit = IndentUnit::detect(&IndentUnit::default_candidates(), &texts)
            .unwrap_or_else(|err| panic!("detect: {err}"));
        assert_eq!(unit, IndentUnit::tab());
    }

    #[test]
    fn detect_fails_without_any_candidate() {
        let texts = ["flat\nfile\n"];
        let error = IndentUnit::detect(&IndentUnit::default_candidates(), &texts)
            .expect_err("nothing to detect");
        assert!(matches!(error, GraphError::NoIndentUnit { .. }));
        assert_eq!(
            error.to_string(),
            "no indentation unit found in the scanned files (tried 4 spaces, tab)"
        );
    }

    #[rstest]
    #[case("")]
    #[case("ab")]
    #[case(" \t")]
    fn new_rejects_invalid_units(#[case] unit: &str) {
        assert!(IndentUnit::new(unit).is_err());
    }

    #[rstest]
    #[case("tab", IndentUnit::tab())]
    #[case("TAB", IndentUnit::tab())]
    #[case("2", IndentUnit::spaces(2))]
    #[case(" 4 ", IndentUnit::spaces(4))]
    fn parses_cli_values(#[case] value: &str, #[case] expected: IndentUnit) {
        let parsed: IndentUnit = value
            .parse()
            .unwrap_or_else(|err| panic!("parse {value}: {err}"));
        assert_eq!(parsed, expected);
    }

    #[rstest]
    #[case("0")]
    #[case("four")]
    fn rejects_bad_cli_values(#[case] value: &str) {
        assert!(value.parse::<IndentUnit>().is_err());
    }
}

mod matcher_tests {
    use rstest::rstest;

    use crate::DefinitionMatcher;

    fn python() -> DefinitionMatcher {
        DefinitionMatcher::new(["def", "class"]).unwrap_or_else(|err| panic!("matcher: {err}"))
    }

    #[rstest]
    #[case("def a():", Some(("def", "a")))]
    #[case("    def run_all(self, x):", Some(("def", "run_all")))]
    #[case("class Foo(Base):", Some(("class", "Foo")))]
    #[case("class Foo", Some(("class", "Foo")))]
    #[case("def\tspaced ():", Some(("def", "spaced")))]
    #[case("define(x)", None)]
    #[case("undefined = def", None)]
    #[case("def (x)", None)]
    #[case("    return value", None)]
    fn recognises_definitions(#[case] line: &str, #[case] expected: Option<(&str, &str)>) {
        let matcher = python();
        let found = matcher
            .match_line(line)
            .map(|definition| (definition.keyword, definition.name));
        assert_eq!(found, expected);
    }

    #[test]
    fn first_configured_keyword_wins() {
        let matcher = DefinitionMatcher::new(["async def", "def"])
            .unwrap_or_else(|err| panic!("matcher: {err}"));
        let definition = matcher
            .match_line("    async def fetch(url):")
            .unwrap_or_else(|| panic!("should match"));
        assert_eq!(definition.keyword, "async def");
        assert_eq!(definition.name, "fetch");
    }

    #[test]
    fn last_occurrence_on_the_line_names_the_symbol() {
        let matcher = python();
        let definition = matcher
            .match_line("x = def one(); def two():")
            .unwrap_or_else(|| panic!("should match"));
        assert_eq!(definition.name, "two");
    }

    #[test]
    fn keywords_are_matched_literally() {
        let matcher =
            DefinitionMatcher::new(["fn*"]).unwrap_or_else(|err| panic!("matcher: {err}"));
        assert!(matcher.match_line("fn main() {").is_none());
        assert_eq!(
            matcher.match_line("fn* gen() {").map(|d| d.name),
            Some("gen")
        );
    }

    #[test]
    fn blank_keywords_are_rejected() {
        assert!(DefinitionMatcher::new(["def", "  "]).is_err());
    }

    #[test]
    fn keyword_order_is_preserved() {
        let matcher = python();
        assert_eq!(matcher.keywords().collect::<Vec<_>>(), vec!["def", "class"]);
    }

    #[test]
    fn combining_marks_stay_inside_the_name() {
        let matcher = python();
        assert_eq!(
            matcher.match_line("def cafe\u{301}():").map(|d| d.name),
            Some("cafe\u{301}")
        );
    }
}

mod reference_tests {
    use crate::reference::ReferenceFinder;
    use crate::{ScopeDepth, Symbol, SymbolPath, SymbolTable};

    fn finder(roots: &[&str], definitions: &[&str]) -> ReferenceFinder {
        let mut table = SymbolTable::new();
        for root in roots {
            let symbol = Symbol::new(
                [*root].into_iter().collect::<SymbolPath>(),
                ScopeDepth::Root,
                0,
                "file",
            );
            table
                .insert(symbol)
                .unwrap_or_else(|err| panic!("insert: {err}"));
        }
        for (line, name) in definitions.iter().enumerate() {
            let symbol = Symbol::new(
                ["m.py", *name].into_iter().collect::<SymbolPath>(),
                ScopeDepth::Level(0),
                line,
                "def",
            );
            table
                .insert(symbol)
                .unwrap_or_else(|err| panic!("insert: {err}"));
        }
        ReferenceFinder::new(&table).unwrap_or_else(|err| panic!("finder: {err}"))
    }

    #[test]
    fn word_runs_are_distinct_and_ordered() {
        let finder = finder(&[], &["get"]);
        assert_eq!(
            finder.references("    value = getValue(get, _x1)+get"),
            vec!["value", "getValue", "get", "_x1"]
        );
    }

    #[test]
    fn combining_marks_belong_to_the_word() {
        let finder = finder(&[], &[]);
        assert_eq!(
            finder.references("    cafe\u{301}()"),
            vec!["cafe\u{301}"]
        );
    }

    #[test]
    fn file_roots_are_found_between_boundaries() {
        let finder = finder(&["util.py", "m.py", "pkg/io.rs"], &[]);
        assert_eq!(
            finder.references("load(util.py)"),
            vec!["load", "util", "py", "util.py"]
        );
        assert_eq!(
            finder.references("open(\"pkg/io.rs\")"),
            vec!["open", "pkg", "io", "rs", "pkg/io.rs"]
        );
        assert!(!finder.references("load(util.pyc)").contains(&"util.py"));
        assert!(!finder.references("load(autil.py)").contains(&"util.py"));
        assert!(finder.references("util.py").contains(&"util.py"));
    }
}

mod symbol_table_tests {
    use crate::{AliasEntry, AliasLookup, GraphError, ScopeDepth, Symbol, SymbolPath, SymbolTable};

    fn symbol(path: &[&str], line: usize) -> Symbol {
        Symbol::new(
            path.iter().copied().collect::<SymbolPath>(),
            ScopeDepth::Level(0),
            line,
            "def",
        )
    }

    #[test]
    fn colliding_aliases_become_ambiguous_permanently() {
        let mut table = SymbolTable::new();
        for entry in [symbol(&["m.py", "a"], 0), symbol(&["m.py", "b"], 2)] {
            table
                .insert(entry)
                .unwrap_or_else(|err| panic!("insert: {err}"));
        }
        table
            .insert(symbol(&["m.py", "C", "a"], 5))
            .unwrap_or_else(|err| panic!("insert: {err}"));

        assert_eq!(table.alias_entry("a"), Some(&AliasEntry::Ambiguous));
        assert_eq!(table.resolve_alias("a"), AliasLookup::Ambiguous);
        assert_eq!(
            table.alias_entry("b"),
            Some(&AliasEntry::Unique(
                ["m.py", "b"].into_iter().collect::<SymbolPath>()
            ))
        );
        assert_eq!(table.ambiguous_aliases(), vec!["a"]);

        table
            .insert(symbol(&["n.py", "a"], 0))
            .unwrap_or_else(|err| panic!("insert: {err}"));
        assert_eq!(table.resolve_alias("a"), AliasLookup::Ambiguous);
    }

    #[test]
    fn duplicate_paths_are_rejected_without_side_effects() {
        let mut table = SymbolTable::new();
        table
            .insert(symbol(&["m.py", "a"], 0))
            .unwrap_or_else(|err| panic!("insert: {err}"));
        let error = table
            .insert(symbol(&["m.py", "a"], 3))
            .expect_err("duplicate must fail");

        assert!(matches!(
            error,
            GraphError::DuplicatePath { ref path, line: 4 } if path == "m.py.a"
        ));
        assert_eq!(table.len(), 1);
        assert!(matches!(table.resolve_alias("a"), AliasLookup::Unique(_)));
    }

    #[test]
    fn unknown_aliases_resolve_to_nothing() {
        let table = SymbolTable::new();
        assert!(table.is_empty());
        assert_eq!(table.resolve_alias("missing"), AliasLookup::Unknown);
    }

    #[test]
    fn paths_keep_dotted_file_names_distinct() {
        let mut table = SymbolTable::new();
        table
            .insert(Symbol::file_root("a.b"))
            .unwrap_or_else(|err| panic!("insert: {err}"));
        table
            .insert(symbol(&["a", "b"], 0))
            .unwrap_or_else(|err| panic!("distinct paths with the same rendering: {err}"));
        assert_eq!(table.len(), 2);
    }
}

mod scope_tests {
    use crate::{IndentUnit, ScopeDepth, ScopeTracker, Symbol};

    fn assert_strictly_increasing(tracker: &ScopeTracker) {
        let depths: Vec<ScopeDepth> = tracker.stack().map(Symbol::depth).collect();
        assert!(
            depths.windows(2).all(|pair| pair.first() < pair.get(1)),
            "depths not increasing: {depths:?}"
        );
        assert_eq!(depths.first(), Some(&ScopeDepth::Root));
    }

    #[test]
    fn stack_depths_increase_after_every_line() {
        let unit = IndentUnit::spaces(4);
        let lines = [
            "class A:",
            "    def f(self):",
            "        if x:",
            "            def inner():",
            "                pass",
            "    def g(self):",
            "def top():",
            "  odd = 1",
            "pass",
        ];
        let mut tracker = ScopeTracker::new(Symbol::file_root("m.py"));
        for (index, line) in lines.iter().enumerate() {
            let indents = unit.depth(line);
            tracker.enter_line(indents);
            let name = line.trim_start().trim_start_matches("class ").to_owned();
            if line.contains("def ") || line.contains("class ") {
                let path = tracker.child_path(&name);
                tracker.push(Symbol::new(path, ScopeDepth::Level(indents), index, "def"));
            }
            assert_strictly_increasing(&tracker);
        }
    }

    #[test]
    fn root_is_never_popped() {
        let mut tracker = ScopeTracker::new(Symbol::file_root("m.py"));
        let path = tracker.child_path("a");
        tracker.push(Symbol::new(path, ScopeDepth::Level(0), 0, "def"));
        tracker.enter_line(0);
        assert!(tracker.current().is_file_root());
        tracker.enter_line(0);
        assert_eq!(tracker.stack().count(), 1);
    }

    #[test]
    fn siblings_close_the_previous_scope() {
        let mut tracker = ScopeTracker::new(Symbol::file_root("m.py"));
        let f = tracker.child_path("f");
        tracker.push(Symbol::new(f, ScopeDepth::Level(0), 0, "def"));
        tracker.enter_line(1);
        assert_eq!(tracker.current().alias(), "f");

        tracker.enter_line(0);
        let g = tracker.child_path("g");
        assert_eq!(g.to_string(), "m.py.g");
    }
}

mod edge_tests {
    use crate::EdgeLabel;

    #[test]
    fn labels_collapse_into_counters() {
        let first = EdgeLabel::first_call(3, 0);
        assert_eq!(first.to_string(), "L4(3)");
        assert_eq!(first.calls(), 1);

        let second = first.repeated();
        assert_eq!(second.to_string(), "x2");

        let third = second.repeated();
        assert_eq!(third.to_string(), "x3");
        assert_eq!(third.calls(), 3);
    }

    #[test]
    fn offset_is_relative_to_caller_definition() {
        assert_eq!(EdgeLabel::first_call(10, 7).to_string(), "L11(3)");
    }
}

mod graph_tests {
    use crate::{CallGraph, ScopeDepth, Symbol, SymbolPath};

    fn function(name: &str, line: usize) -> Symbol {
        Symbol::new(
            SymbolPath::root("lib.py").child(name),
            ScopeDepth::Level(0),
            line,
            "def",
        )
    }

    #[test]
    fn empty_graph_has_no_nodes() {
        let graph = CallGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn node_labels_include_kind_path_and_line() {
        assert_eq!(
            function("main", 9).node_label().as_str(),
            "def lib.py.main L10"
        );
        assert_eq!(
            Symbol::file_root("lib.py").node_label().as_str(),
            "file lib.py L1"
        );
    }

    #[test]
    fn repeated_calls_share_one_edge() {
        let mut graph = CallGraph::new();
        let caller = function("caller", 0);
        let callee = function("callee", 20);

        let first = graph.record_call(&caller, &callee, 2);
        let second = graph.record_call(&caller, &callee, 7);
        let third = graph.record_call(&caller, &callee, 2);

        assert_eq!(first.to_string(), "L3(2)");
        assert_eq!(second.to_string(), "x2");
        assert_eq!(third.to_string(), "x3");
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn edges_are_looked_up_by_ordered_pair() {
        let mut graph = CallGraph::new();
        let caller = function("caller", 5);
        let callee = function("callee", 20);
        graph.record_call(&caller, &callee, 6);

        let edge = graph
            .edge(&caller.node_label(), &callee.node_label())
            .unwrap_or_else(|| panic!("edge missing"));
        assert_eq!(edge.caller(), &caller.node_label());
        assert_eq!(edge.callee(), &callee.node_label());
        assert!(
            graph
                .edge(&callee.node_label(), &caller.node_label())
                .is_none()
        );
    }

    #[test]
    fn self_loops_are_kept() {
        let mut graph = CallGraph::new();
        let recursive = function("walk", 0);
        graph.record_call(&recursive, &recursive, 3);

        let edge = graph
            .edge(&recursive.node_label(), &recursive.node_label())
            .unwrap_or_else(|| panic!("self loop missing"));
        assert!(edge.is_self_loop());
    }

    #[test]
    fn adding_a_node_twice_keeps_one() {
        let mut graph = CallGraph::new();
        graph.add_node(function("my_function", 10).node_label());
        graph.add_node(function("my_function", 10).node_label());

        assert_eq!(graph.node_count(), 1);
        assert!(graph.edges().next().is_none());
    }
}

mod analysis_tests {
    use insta::assert_snapshot;

    use crate::{
        Analysis, AnalysisReport, DefinitionMatcher, GraphError, IndentUnit, SourceFile,
        SymbolPath,
    };

    fn analyse(keywords: &[&str], sources: &[SourceFile]) -> Result<AnalysisReport, GraphError> {
        let matcher = DefinitionMatcher::new(keywords.iter().copied())
            .unwrap_or_else(|err| panic!("matcher: {err}"));
        Analysis::new(IndentUnit::spaces(4), matcher).run(sources)
    }

    fn render_edges(report: &AnalysisReport) -> String {
        report
            .graph()
            .edges()
            .map(|edge| format!("{} -> {} [{}]", edge.caller(), edge.callee(), edge.label()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn nested_definition_called_from_parent() {
        let source = SourceFile::new(
            "pkg/nested.py",
            "def a():\n    def b():\n        pass\n    b()\n",
        );
        let report = analyse(&["def"], &[source]).unwrap_or_else(|err| panic!("run: {err}"));

        assert_eq!(report.symbols().len(), 3);
        let b = report
            .symbols()
            .get(&["nested.py", "a", "b"].into_iter().collect::<SymbolPath>())
            .unwrap_or_else(|| panic!("b should be nested in a"));
        assert_eq!(b.defined_at_line(), 1);
        assert_snapshot!(render_edges(&report), @"def nested.py.a L1 -> def nested.py.a.b L2 [L4(3)]");
    }

    #[test]
    fn calls_resolve_across_files_and_forward_references() {
        let main = SourceFile::new(
            "main.py",
            "def main():\n    helper()\n    later()\n\ndef later():\n    pass\n",
        );
        let util = SourceFile::new("util.py", "def helper():\n    later()\n");
        let report = analyse(&["def"], &[main, util]).unwrap_or_else(|err| panic!("run: {err}"));

        assert_snapshot!(render_edges(&report), @r"
        def main.py.main L1 -> def util.py.helper L1 [L2(1)]
        def main.py.main L1 -> def main.py.later L5 [L3(2)]
        def util.py.helper L1 -> def main.py.later L5 [L2(1)]
        ");
        assert_eq!(report.graph().node_count(), 5);
    }

    #[test]
    fn top_level_references_come_from_the_file_root() {
        let source = SourceFile::new(
            "script.py",
            "def run():\n    run()\n\nrun()\nrun()\n",
        );
        let report = analyse(&["def"], &[source]).unwrap_or_else(|err| panic!("run: {err}"));

        assert_snapshot!(render_edges(&report), @r"
        def script.py.run L1 -> def script.py.run L1 [L2(1)]
        file script.py L1 -> def script.py.run L1 [x2]
        ");
    }

    #[test]
    fn ambiguous_names_are_dropped_and_reported() {
        let one = SourceFile::new("one.py", "def x():\n    pass\n");
        let two = SourceFile::new(
            "two.py",
            "def x():\n    pass\n\ndef caller():\n    x()\n    x(x)\n",
        );
        let report = analyse(&["def"], &[one, two]).unwrap_or_else(|err| panic!("run: {err}"));

        assert_eq!(report.graph().edge_count(), 0);
        let diagnostics = report.diagnostics();
        assert!(diagnostics.is_ambiguous("x"));
        assert_eq!(diagnostics.ambiguous_names().collect::<Vec<_>>(), vec!["x"]);
        let sites: Vec<String> = diagnostics
            .call_sites("x")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(sites, vec!["two.py:5", "two.py:6"]);
    }

    #[test]
    fn duplicate_paths_abort_with_the_file_named() {
        let source = SourceFile::new("dup.py", "def a():\n    pass\ndef a():\n    pass\n");
        let error = analyse(&["def"], &[source]).expect_err("duplicate must abort");

        assert_eq!(
            error.to_string(),
            "dup.py: duplicate symbol path 'dup.py.a' defined at line 3"
        );
        assert!(matches!(
            error.root_cause(),
            GraphError::DuplicatePath { .. }
        ));
    }

    #[test]
    fn files_sharing_a_base_name_need_distinct_roots() {
        let first = SourceFile::new("a/mod.py", "def one():\n    pass\n");
        let second = SourceFile::new("b/mod.py", "def two():\n    pass\n");
        assert!(analyse(&["def"], &[first.clone(), second.clone()]).is_err());

        let report = analyse(
            &["def"],
            &[
                first.with_root_name("a/mod.py"),
                second.with_root_name("b/mod.py"),
            ],
        )
        .unwrap_or_else(|err| panic!("run: {err}"));
        assert_eq!(report.symbols().len(), 4);
    }

    #[test]
    fn file_roots_are_called_by_their_base_name() {
        let util = SourceFile::new("util.py", "def helper():\n    pass\n");
        let main = SourceFile::new("main.py", "def main():\n    load(util.py)\n");
        let report = analyse(&["def"], &[util, main]).unwrap_or_else(|err| panic!("run: {err}"));

        assert_snapshot!(render_edges(&report), @"def main.py.main L1 -> file util.py L1 [L2(1)]");
    }

    #[test]
    fn qualified_roots_are_called_by_their_relative_path() {
        let io =
            SourceFile::new("pkg/io.py", "def read():\n    pass\n").with_root_name("pkg/io.py");
        let main = SourceFile::new("main.py", "def main():\n    run(\"pkg/io.py\")\n")
            .with_root_name("main.py");
        let report = analyse(&["def"], &[io, main]).unwrap_or_else(|err| panic!("run: {err}"));

        assert_snapshot!(render_edges(&report), @"def main.py.main L1 -> file pkg/io.py L1 [L2(1)]");
    }

    #[test]
    fn names_with_combining_marks_are_called() {
        let source = SourceFile::new(
            "accents.py",
            "def cafe\u{301}():\n    pass\n\ndef main():\n    cafe\u{301}()\n",
        );
        let report = analyse(&["def"], &[source]).unwrap_or_else(|err| panic!("run: {err}"));

        assert_eq!(report.graph().edge_count(), 1);
        assert_snapshot!(
            render_edges(&report),
            @"def accents.py.main L4 -> def accents.py.cafe\u{301} L1 [L5(1)]"
        );
    }

    #[test]
    fn blank_lines_do_not_close_scopes() {
        let source = SourceFile::new(
            "gap.py",
            "def outer():\n\n\n    def inner():\n        pass\n\n    inner()\n",
        );
        let report = analyse(&["def"], &[source]).unwrap_or_else(|err| panic!("run: {err}"));

        assert_snapshot!(render_edges(&report), @"def gap.py.outer L1 -> def gap.py.outer.inner L4 [L7(6)]");
    }
}
