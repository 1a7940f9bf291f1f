//! End-to-end validation of entity files through the full pipeline.

use doctrine_lint_core::{Analyzer, Outcome, Severity, SourceUnit, SyntaxVerdict};
use doctrine_lint_rules::all_rules;
use std::path::PathBuf;
use tempfile::TempDir;

/// Stands in for `php -l`: rejects files whose braces do not balance.
fn brace_balance(unit: &SourceUnit) -> SyntaxVerdict {
    let opens = unit.text.matches('{').count();
    let closes = unit.text.matches('}').count();
    if opens == closes {
        SyntaxVerdict::Valid
    } else {
        SyntaxVerdict::Invalid {
            output: format!(
                "PHP Parse error:  Unclosed '{{' in {} on line 1\nErrors parsing {}\n",
                unit.path.display(),
                unit.path.display()
            ),
        }
    }
}

fn analyzer() -> Analyzer {
    Analyzer::builder()
        .rules(all_rules())
        .syntax_checker(brace_balance)
        .build()
        .expect("Failed to build analyzer")
}

fn write_entity(dir: &TempDir, name: &str, php: &str) -> PathBuf {
    let entity_dir = dir.path().join("src").join("Entity");
    std::fs::create_dir_all(&entity_dir).unwrap();
    let path = entity_dir.join(name);
    std::fs::write(&path, php).unwrap();
    path
}

fn validate(php: &str) -> Outcome {
    let dir = TempDir::new().unwrap();
    let path = write_entity(&dir, "Subject.php", php);
    analyzer().validate_path(&path)
}

fn codes(outcome: &Outcome) -> Vec<String> {
    outcome
        .report()
        .map(|r| r.diagnostics.iter().map(|d| d.code.clone()).collect())
        .unwrap_or_default()
}

fn text(outcome: &Outcome) -> String {
    outcome.report().map(|r| r.render_text()).unwrap_or_default()
}

const CUSTOMER: &str = r"<?php

namespace App\Entity;

use Doctrine\ORM\Mapping as ORM;

#[ORM\Entity]
class Customer
{
    #[ORM\Id]
    #[ORM\GeneratedValue]
    #[ORM\Column]
    private ?int $id = null;

    #[ORM\Column(length: 100)]
    public string $name;
}
";

#[test]
fn scenario_a_missing_namespace() {
    let outcome = validate(
        r"<?php

use Doctrine\ORM\Mapping as ORM;

#[ORM\Entity]
class Widget
{
    #[ORM\Id]
    #[ORM\Column(type: 'integer')]
    private int $id;
}
",
    );

    assert_eq!(outcome.exit_code(), 2);
    assert_eq!(codes(&outcome), vec!["DL001"]);
    assert!(text(&outcome).contains("Missing namespace"));
}

#[test]
fn scenario_b_public_property_then_readonly() {
    let outcome = validate(CUSTOMER);
    assert_eq!(outcome.exit_code(), 2);
    assert!(text(&outcome).contains("Public properties"));

    let fixed = CUSTOMER.replace("public string $name", "public readonly string $name");
    let outcome = validate(&fixed);
    assert_eq!(outcome.exit_code(), 0);
    assert!(text(&outcome).is_empty());
}

#[test]
fn scenario_c_decimal_without_precision_and_scale() {
    let outcome = validate(
        r"<?php

namespace App\Entity;

use Doctrine\ORM\Mapping as ORM;

#[ORM\Entity]
class Product
{
    #[ORM\Id]
    #[ORM\GeneratedValue]
    #[ORM\Column]
    private ?int $id = null;

    #[ORM\Column(type: 'decimal')]
    private string $price;
}
",
    );

    assert_eq!(outcome.exit_code(), 2);
    let text = text(&outcome);
    assert!(text.contains("precision"));
    assert!(text.contains("scale"));
}

const PARENT: &str = r"<?php

namespace App\Entity;

use Doctrine\Common\Collections\ArrayCollection;
use Doctrine\Common\Collections\Collection;
use Doctrine\ORM\Mapping as ORM;

#[ORM\Entity]
class Category
{
    #[ORM\Id]
    #[ORM\GeneratedValue]
    #[ORM\Column]
    private ?int $id = null;

    #[ORM\OneToMany(targetEntity: Category::class)]
    private Collection $children;
}
";

#[test]
fn scenario_d_one_to_many_without_mapped_by_then_fixed() {
    let outcome = validate(PARENT);
    assert_eq!(outcome.exit_code(), 2);
    let report = text(&outcome);
    assert!(report.contains("OneToMany"));
    assert!(report.contains("mappedBy"));

    let fixed = PARENT
        .replace(
            "targetEntity: Category::class)",
            "targetEntity: Category::class, mappedBy: 'parent')",
        )
        .replace(
            "    private Collection $children;\n",
            "    private Collection $children;\n\n    public function __construct()\n    {\n        $this->children = new ArrayCollection();\n    }\n",
        );
    let outcome = validate(&fixed);
    assert_eq!(outcome.exit_code(), 0, "{}", text(&outcome));
}

#[test]
fn scenario_e_embeddable_with_association() {
    let outcome = validate(
        r"<?php

namespace App\Entity;

use Doctrine\ORM\Mapping as ORM;

#[ORM\Embeddable]
class Address
{
    #[ORM\Column(length: 120)]
    private string $street;

    #[ORM\ManyToOne(targetEntity: Country::class)]
    private Country $country;
}
",
    );

    assert_eq!(outcome.exit_code(), 2);
    let text = text(&outcome);
    assert!(text.contains("Embeddable"));
    assert!(text.contains("cannot contain associations"));
}

#[test]
fn scenario_f_syntax_error_is_fatal_and_alone() {
    let outcome = validate(
        r"<?php

#[ORM\Entity]
class Broken
{
    public string $name;
",
    );

    assert_eq!(outcome.exit_code(), 2);
    let report = outcome.report().unwrap();
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].severity, Severity::Fatal);
    let text = report.render_text();
    assert!(text.starts_with("PHP syntax error in "));
    assert!(text.contains("Parse error"));
    assert!(!text.contains("Missing namespace"));
}

#[test]
fn validation_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_entity(&dir, "Category.php", PARENT);
    let analyzer = analyzer();

    let first = analyzer.validate_path(&path);
    let second = analyzer.validate_path(&path);
    assert_eq!(first, second);
    assert_eq!(text(&first), text(&second));
}

#[test]
fn entity_without_id_reports_missing_primary_key_once() {
    let outcome = validate(
        r"<?php

namespace App\Entity;

#[ORM\Entity]
class Tag
{
    #[ORM\Column(length: 40)]
    private string $label;

    #[ORM\Column(length: 40)]
    private string $slug;
}
",
    );

    let codes = codes(&outcome);
    assert_eq!(codes.iter().filter(|c| *c == "DL002").count(), 1);
    assert!(text(&outcome).contains("Missing #[Id]"));
}

#[test]
fn both_mapped_by_and_inversed_by_does_not_double_fire() {
    let outcome = validate(
        r"<?php

namespace App\Entity;

use Doctrine\ORM\Mapping as ORM;

#[ORM\Entity]
class Comment
{
    #[ORM\Id, ORM\GeneratedValue, ORM\Column]
    private ?int $id = null;

    #[ORM\ManyToOne(targetEntity: Post::class, mappedBy: 'comments', inversedBy: 'comments')]
    private ?Post $post = null;
}
",
    );

    assert_eq!(codes(&outcome), vec!["DL010"]);
    assert!(text(&outcome).contains("both mappedBy and inversedBy"));
}

#[test]
fn diagnostics_follow_rule_order() {
    let outcome = validate(
        r"<?php

#[ORM\Entity]
class Mess
{
    #[ORM\GeneratedValue]
    #[ORM\Column(type: 'string')]
    public int $code;
}
",
    );

    assert_eq!(
        codes(&outcome),
        vec!["DL001", "DL002", "DL003", "DL005", "DL007", "DL009"]
    );
}

#[test]
fn clean_entity_exits_zero_silently() {
    let outcome = validate(
        r#"<?php

declare(strict_types=1);

namespace App\Entity;

use App\Repository\PostRepository;
use Doctrine\Common\Collections\ArrayCollection;
use Doctrine\Common\Collections\Collection;
use Doctrine\DBAL\Types\Types;
use Doctrine\ORM\Mapping as ORM;

/**
 * A blog post. {@see Comment}
 */
#[ORM\Entity(repositoryClass: PostRepository::class)]
#[ORM\Table(name: 'posts')]
#[ORM\HasLifecycleCallbacks]
class Post
{
    #[ORM\Id]
    #[ORM\GeneratedValue]
    #[ORM\Column]
    private ?int $id = null;

    #[ORM\Column(type: Types::STRING, length: 200)]
    private string $title = '';

    #[ORM\Column(type: Types::DECIMAL, precision: 5, scale: 2)]
    private string $rating = '0.00';

    #[ORM\Column(type: Types::DATETIME_IMMUTABLE)]
    private ?\DateTimeImmutable $publishedAt = null;

    #[ORM\ManyToOne(targetEntity: User::class, inversedBy: 'posts')]
    #[ORM\JoinColumn(nullable: false)]
    private ?User $author = null;

    /** @var Collection<int, Comment> */
    #[ORM\OneToMany(targetEntity: Comment::class, mappedBy: 'post', orphanRemoval: true)]
    #[ORM\OrderBy(['createdAt' => 'DESC'])]
    private Collection $comments;

    #[ORM\ManyToMany(targetEntity: Tag::class, inversedBy: 'posts')]
    #[ORM\JoinTable(name: 'post_tags')]
    private Collection $tags;

    public function __construct()
    {
        $this->comments = new ArrayCollection();
        $this->tags = new ArrayCollection();
    }

    #[ORM\PreUpdate]
    public function touch(): void
    {
        // Refresh derived state before flush.
        $this->title = trim($this->title);
    }
}
"#,
    );

    assert_eq!(outcome.exit_code(), 0, "{}", text(&outcome));
    assert!(matches!(outcome, Outcome::Checked(ref r) if r.is_clean()));
}

#[test]
fn repository_is_checked_outside_entity_dir() {
    let dir = TempDir::new().unwrap();
    let repo_dir = dir.path().join("src").join("Repository");
    std::fs::create_dir_all(&repo_dir).unwrap();
    let path = repo_dir.join("PostRepository.php");
    std::fs::write(
        &path,
        r"<?php

namespace App\Repository;

use Doctrine\Bundle\DoctrineBundle\Repository\ServiceEntityRepository;

class PostRepository extends ServiceEntityRepository
{
    public function findLatest(int $limit)
    {
        return [];
    }
}
",
    )
    .unwrap();

    let outcome = analyzer().validate_path(&path);
    assert_eq!(codes(&outcome), vec!["DL020"]);
    assert!(text(&outcome).contains("return type"));
}

#[test]
fn unrelated_files_are_not_applicable() {
    let dir = TempDir::new().unwrap();
    let service_dir = dir.path().join("src").join("Service");
    std::fs::create_dir_all(&service_dir).unwrap();

    let service = service_dir.join("Mailer.php");
    std::fs::write(&service, "<?php\nnamespace App\\Service;\nclass Mailer { public $x; }\n").unwrap();
    assert_eq!(analyzer().validate_path(&service), Outcome::NotApplicable);

    let readme = dir.path().join("src").join("Entity").join("README.md");
    std::fs::create_dir_all(readme.parent().unwrap()).unwrap();
    std::fs::write(&readme, "#[ORM\\Entity]").unwrap();
    assert_eq!(analyzer().validate_path(&readme), Outcome::NotApplicable);
}
