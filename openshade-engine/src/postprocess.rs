//! Post process injection into the HDR tone map pipeline.
//!
//! The chain hangs off a `float4 EndColor` accumulator spliced over the
//! final return of HDR.hlsl. Each enabled effect contributes an HLSL
//! function ahead of the tone map entry point plus a call site threaded
//! through the accumulator, optionally gated on the time of day.

use openshade_patch::PatchRun;
use openshade_presets::{PostProcess, PostProcessId, DAY_NIGHT_KEY};

/// Comment line opening the tone map entry point; effect functions are
/// injected in front of it.
const TONEMAP_ANCHOR: &str =
    "// Applies exposure and tone mapping to the input, and combines it with the";

/// The accumulator return each effect call site is chained before.
const CHAIN_RETURN: &str = "return EndColor;";

/// Replaces the final return of HDR.hlsl with the accumulator the post
/// chain appends to. Run once before the first effect.
pub(crate) fn install_accumulator(run: &mut PatchRun) {
    run.replace_all(
        "return float4(finalColor, 1.0f);",
        "float4 EndColor = float4(finalColor.rgb, 1);\r\nreturn EndColor;",
    );
}

/// Splices one effect into the HDR buffer: its function body, then its
/// call site at the end of the current chain.
pub(crate) fn install_post(post: &PostProcess, run: &mut PatchRun) {
    run.add_before(TONEMAP_ANCHOR, &function_block(post));
    run.add_before(CHAIN_RETURN, &call_site(post));
}

fn call_site(post: &PostProcess) -> String {
    let call = format!("EndColor = {}(vert, EndColor);\r\n", post.id.entry_point());
    match day_night_condition(post) {
        Some(condition) => format!("if ({condition}) {{\r\n{call}}}\r\n"),
        None => call,
    }
}

/// The `cb_mDayNightInterpolant` gate for a `DayNightUse` choice.
/// `0` (Always), a missing key, and out-of-range values all mean no
/// gate at all.
fn day_night_condition(post: &PostProcess) -> Option<&'static str> {
    match post.parameter_value(DAY_NIGHT_KEY).unwrap_or("0") {
        "1" => Some("cb_mDayNightInterpolant < 0.11"),
        "2" => Some("cb_mDayNightInterpolant > 0.89"),
        "3" => Some("cb_mDayNightInterpolant < 0.89"),
        "4" => Some("cb_mDayNightInterpolant > 0.11"),
        "5" => Some("cb_mDayNightInterpolant > 0.11 && cb_mDayNightInterpolant < 0.89"),
        _ => None,
    }
}

/// Renders an effect's HLSL function with its parameter values baked in
/// as constants. Templates use unix newlines and `@p<n>@` tokens in
/// catalog parameter order; the emitted text is CRLF like the rest of
/// the shader file.
fn function_block(post: &PostProcess) -> String {
    let template = match post.id {
        PostProcessId::Sepia => SEPIA,
        PostProcessId::Curves => CURVES,
        PostProcessId::Levels => LEVELS,
        PostProcessId::LiftGammaGain => LIFT_GAMMA_GAIN,
        PostProcessId::Technicolor => TECHNICOLOR,
        PostProcessId::Vibrance => VIBRANCE,
        PostProcessId::CineonDpx => CINEON_DPX,
        PostProcessId::Tonemap => TONEMAP,
        PostProcessId::LumaSharpen => LUMA_SHARPEN,
    };
    let mut block = template.replace('\n', "\r\n");
    for (i, parameter) in post.parameters.iter().enumerate() {
        block = block.replace(&format!("@p{i}@"), &parameter.value);
    }
    block
}

const SEPIA: &str = r#"float4 SepiaMain(PsQuad vert, float4 color) : SV_Target
{
const float3 Sepia_ColorTone = float3(@p0@);
const float Sepia_GreyPower = @p1@;
const float Sepia_SepiaPower = @p2@;
    uint2 uTDim, uDDim;
    srcTex.GetDimensions(uTDim.x,uTDim.y);
    int3 iTexCoord = int3(uTDim.x * vert.texcoord.x, uTDim.y * vert.texcoord.y, 0);
	float3 sepia = color.rgb;
	float grey = dot(sepia, float3(0.2126, 0.7152, 0.0722));
	sepia *= Sepia_ColorTone;
	float3 blend2 = (grey * Sepia_GreyPower) + (color.rgb / (Sepia_GreyPower + 1));
	color.rgb = lerp(blend2, sepia, Sepia_SepiaPower);
	return color;
}"#;

const CURVES: &str = r#"#define Curves_mode @p0@
#define Curves_formula @p2@
float4 CurvesMain(PsQuad vert, float4 color) : SV_Target
{
  const float Curves_contrast = @p1@;
  uint2 uTDim, uDDim;
  srcTex.GetDimensions(uTDim.x,uTDim.y);
  int3 iTexCoord = int3(uTDim.x * vert.texcoord.x, uTDim.y * vert.texcoord.y, 0);
  float4 colorInput = saturate(color);
  float3 lumCoeff = float3(0.2126, 0.7152, 0.0722);
  float Curves_contrast_blend = Curves_contrast;
#if Curves_mode != 2
   float luma = dot(lumCoeff, colorInput.rgb);
    float3 chroma = colorInput.rgb - luma;
#endif
#if Curves_mode == 2
	float3 x = colorInput.rgb;
#elif Curves_mode == 1
	float3 x = chroma;
	x = x * 0.5 + 0.5;
#else
	float x = luma;
#endif
#if Curves_formula == 1
   x = sin(3.1415927 * 0.5 * x);
   x *= x;
#endif
#if Curves_formula == 2
  x = x - 0.5;
  x = ( x / (0.5 + abs(x)) ) + 0.5;
#endif
#if Curves_formula == 3
	x = x*x*(3.0-2.0*x);
#endif
#if Curves_formula == 4
   x = (1.0524 * exp(6.0 * x) - 1.05248) / (exp(6.0 * x) + 20.0855);
#endif
#if Curves_formula == 5
  x = x * (x * (1.5-x) + 0.5);
  Curves_contrast_blend = Curves_contrast * 2.0;
#endif
#if Curves_formula == 6
  x = x*x*x*(x*(x*6.0 - 15.0) + 10.0);
#endif
#if Curves_formula == 7
	x = x - 0.5;
	x = x / ((abs(x)*1.25) + 0.375 ) + 0.5;
#endif
#if Curves_formula == 8
  x = (x * (x * (x * (x * (x * (x * (1.6 * x - 7.2) + 10.8) - 4.2) - 3.6) + 2.7) - 1.8) + 2.7) * x * x;
#endif
#if Curves_formula == 9
  x =  -0.5 * (x*2.0-1.0) * (abs(x*2.0-1.0)-2.0) + 0.5;
#endif
#if Curves_formula == 10
    #if Curves_mode == 0
			float xstep = step(x,0.5);
			float xstep_shift = (xstep - 0.5);
			float shifted_x = x + xstep_shift;
    #else
			float3 xstep = step(x,0.5);
			float3 xstep_shift = (xstep - 0.5);
			float3 shifted_x = x + xstep_shift;
    #endif
	x = abs(xstep - sqrt(-shifted_x * shifted_x + shifted_x) ) - xstep_shift;
	Curves_contrast_blend = Curves_contrast * 0.5;
#endif
#if Curves_formula == 11
  	#if Curves_mode == 0
			float a = 0.0;
			float b = 0.0;
		#else
			float3 a = float3(0.0,0.0,0.0);
			float3 b = float3(0.0,0.0,0.0);
		#endif
    a = x * x * 2.0;
    b = (2.0 * -x + 4.0) * x - 1.0;
    x = (x < 0.5) ? a : b;
#endif
#if Curves_formula == 21
    float a = 1.00; float b = 0.00; float c = 1.00; float d = 0.20;
    x = 0.5 * ((-a + 3*b -3*c + d)*x*x*x + (2*a -5*b + 4*c - d)*x*x + (-a+c)*x + 2*b);
#endif
#if Curves_formula == 22
    float a = 0.00; float b = 0.00; float c = 1.00; float d = 1.00;
	float r  = (1-x); float r2 = r*r; float r3 = r2 * r; float x2 = x*x; float x3 = x2*x;
	x = a*(1-x)*(1-x)*(1-x) + 3*b*(1-x)*(1-x)*x + 3*c*(1-x)*x*x + d*x*x*x;
#endif
#if Curves_formula == 23
    float3 a = float3(0.00,0.00,0.00); float3 b = float3(0.25,0.15,0.85);  float3 c = float3(0.75,0.85,0.15); float3 d = float3(1.00,1.00,1.00);
    float3 ab = lerp(a,b,x); float3 bc = lerp(b,c,x); float3 cd = lerp(c,d,x); float3 abbc = lerp(ab,bc,x); float3 bccd = lerp(bc,cd,x);
    float3 dest = lerp(abbc,bccd,x);
    x = dest;
#endif
#if Curves_formula == 24
   x = 1.0 / (1.0 + exp(-(x * 10.0 - 5.0)));
#endif
#if Curves_mode == 2
	float3 color = x;
	colorInput.rgb = lerp(colorInput.rgb, color, Curves_contrast_blend);
  #elif Curves_mode == 1
	x = x * 2.0 - 1.0;
	float3 color = luma + x;
	colorInput.rgb = lerp(colorInput.rgb, color, Curves_contrast_blend);
  #else
    x = lerp(luma, x, Curves_contrast_blend);
    colorInput.rgb = x + chroma;
#endif
  return colorInput;
}"#;

const LEVELS: &str = r#"float4 LevelsMain(PsQuad vert, float4 color) : SV_Target
{
const float Levels_black_point = @p0@;
const float Levels_white_point = @p1@;
const float black_point_float = ( Levels_black_point / 255.0 );
float white_point_float;
if (Levels_white_point == Levels_black_point)
  white_point_float = ( 255.0 / 0.00025);
else
  white_point_float = ( 255.0 / (Levels_white_point - Levels_black_point));
    uint2 uTDim, uDDim;
    srcTex.GetDimensions(uTDim.x,uTDim.y);
    int3 iTexCoord = int3(uTDim.x * vert.texcoord.x, uTDim.y * vert.texcoord.y, 0);
	float4 colorInput = color;
	colorInput.rgb = colorInput.rgb * white_point_float - (black_point_float *  white_point_float);
	return colorInput;
}"#;

const LIFT_GAMMA_GAIN: &str = r#"float4 LiftGammaGainMain(PsQuad vert, float4 Inp_color) : SV_Target
{
const float3 RGB_Lift = float3(@p0@);
const float3 RGB_Gamma = float3(@p1@);
const float3 RGB_Gain = float3(@p2@);
    uint2 uTDim, uDDim;
    srcTex.GetDimensions(uTDim.x,uTDim.y);
    int3 iTexCoord = int3(uTDim.x * vert.texcoord.x, uTDim.y * vert.texcoord.y, 0);
	float4 colorInput = Inp_color;
	float3 color = colorInput.rgb;
	color = color * (1.5-0.5 * RGB_Lift) + 0.5 * RGB_Lift - 0.5;
	color = saturate(color);
	color *= RGB_Gain;
	colorInput.rgb = pow(color, 1.0 / RGB_Gamma);
	return saturate(colorInput);
}"#;

const TECHNICOLOR: &str = r#"#define cyanfilter float3(0.0, 1.30, 1.0)
#define magentafilter float3(1.0, 0.0, 1.05)
#define yellowfilter float3(1.6, 1.6, 0.05)
#define redorangefilter float2(1.05, 0.620)
#define greenfilter float2(0.30, 1.0)
#define magentafilter2 magentafilter.rb
float4 TechnicolorMain(PsQuad vert, float4 color) : SV_Target
{
    const float TechniAmount = @p0@;
    const float TechniPower = @p1@;
    const float redNegativeAmount = @p2@;
    const float greenNegativeAmount = @p3@;
    const float blueNegativeAmount = @p4@;
    uint2 uTDim, uDDim;
    srcTex.GetDimensions(uTDim.x, uTDim.y);
    int3 iTexCoord = int3(uTDim.x * vert.texcoord.x, uTDim.y * vert.texcoord.y, 0);
    float4 colorInput = color;
    float3 tcol = colorInput.rgb;
    float2 rednegative_mul = tcol.rg * (1.0 / (redNegativeAmount * TechniPower));
    float2 greennegative_mul = tcol.rg * (1.0 / (greenNegativeAmount * TechniPower));
    float2 bluenegative_mul = tcol.rb * (1.0 / (blueNegativeAmount * TechniPower));
    float rednegative = dot(redorangefilter, rednegative_mul);
    float greennegative = dot(greenfilter, greennegative_mul);
    float bluenegative = dot(magentafilter2, bluenegative_mul);
    float3 redoutput = rednegative.rrr + cyanfilter;
    float3 greenoutput = greennegative.rrr + magentafilter;
    float3 blueoutput = bluenegative.rrr + yellowfilter;
    float3 result = redoutput * greenoutput * blueoutput;
    colorInput.rgb = lerp(tcol, result, TechniAmount);
    return colorInput;
}
"#;

const VIBRANCE: &str = r#"float4 VibranceMain(PsQuad vert, float4 Inp_color) : SV_Target
{
const float Vibrance = @p0@;
const float3 Vibrance_RGB_balance = float3(@p1@);
    uint2 uTDim, uDDim;
    srcTex.GetDimensions(uTDim.x,uTDim.y);
    int3 iTexCoord = int3(uTDim.x * vert.texcoord.x, uTDim.y * vert.texcoord.y, 0);
	float4 colorInput = Inp_color;
 float3 Vibrance_coeff = float3(Vibrance_RGB_balance * Vibrance);
	float4 color = colorInput;
	float3 lumCoeff = float3(0.212656, 0.715158, 0.072186);
	float luma = dot(lumCoeff, color.rgb);
	float max_color = max(colorInput.r, max(colorInput.g,colorInput.b));
	float min_color = min(colorInput.r, min(colorInput.g,colorInput.b));
	float color_saturation = max_color - min_color;
	color.rgb = lerp(luma, color.rgb, (1.0 + (Vibrance_coeff * (1.0 - (sign(Vibrance_coeff) * color_saturation)))));
	return color;
}"#;

const CINEON_DPX: &str = r#"float4 DPXMain(PsQuad vert, float4 Inp_color) : SV_Target
{
const float3x3 RGB = float3x3
(2.67147117265996,-1.26723605786241,-0.410995602172227,
-1.02510702934664,1.98409116241089,0.0439502493584124,
0.0610009456429445,-0.223670750812863,1.15902104167061);
const float3x3 XYZ = float3x3
(0.500303383543316,0.338097573222739,0.164589779545857,
0.257968894274758,0.676195259144706,0.0658358459823868,
0.0234517888692628,0.1126992737203,0.866839673124201);

const float DPX_ColorGamma = @p1@;
const float DPXSaturation = @p2@;

const float DPX_Blend = @p4@;
	uint2 uTDim, uDDim;
	srcTex.GetDimensions(uTDim.x,uTDim.y);
	int3 iTexCoord = int3(uTDim.x * vert.texcoord.x, uTDim.y * vert.texcoord.y, 0);
	float4 InputColor = Inp_color;
	float DPXContrast = 0.1;
	float DPXGamma = 1.0;
	float3 RGB_Curve = float3(@p0@);
	float3 RGB_C = float3(@p3@);
	float3 B = InputColor.rgb;
	B = pow(abs(B), 1.0/DPXGamma);
	B = B * (1.0 - DPXContrast) + (0.5 * DPXContrast);
    float3 Btemp = (1.0 / (1.0 + exp(RGB_Curve / 2.0)));
	B = ((1.0 / (1.0 + exp(-RGB_Curve * (B - RGB_C)))) / (-2.0 * Btemp + 1.0)) + (-Btemp / (-2.0 * Btemp + 1.0));
	float value = max(max(B.r, B.g), B.b);
	float3 color = B / value;
	color = pow(abs(color), 1.0/DPX_ColorGamma);
	float3 c0 = color * value;
	c0 = mul(XYZ, c0);
	float luma = dot(c0, float3(0.30, 0.59, 0.11));
    c0 = (1.0 - DPXSaturation) * luma + DPXSaturation * c0;
	c0 = mul(RGB, c0);
	InputColor.rgb = lerp(InputColor.rgb, c0, DPX_Blend);
	return InputColor;
}"#;

const TONEMAP: &str = r#"float4 TonemapMain(PsQuad vert, float4 Inp_color) : SV_Target
{
const float Tonemap_Gamma = @p0@;
const float Tonemap_Exposure = @p1@;
const float Tonemap_Saturation = @p2@;
const float Tonemap_Bleach = @p3@;
const float Tonemap_Defog = @p4@;
const float3 Tonemap_FogColor = float3(@p5@);
    uint2 uTDim, uDDim;
    srcTex.GetDimensions(uTDim.x,uTDim.y);
    int3 iTexCoord = int3(uTDim.x * vert.texcoord.x, uTDim.y * vert.texcoord.y, 0);
    float4 colorInput = Inp_color;
    float3 color = colorInput.rgb;
    color = saturate(color - Tonemap_Defog * Tonemap_FogColor);
    color *= pow(2.0f, Tonemap_Exposure);
    color = pow(color, Tonemap_Gamma);
    float3 lumCoeff = float3(0.2126, 0.7152, 0.0722);
    float lum = dot(lumCoeff, color.rgb);
    float3 blend = lum.rrr;
    float L = saturate( 10.0 * (lum - 0.45) );
    float3 result1 = 2.0f * color.rgb * blend;
    float3 result2 = 1.0f - 2.0f * (1.0f - blend) * (1.0f - color.rgb);
    float3 newColor = lerp(result1, result2, L);
    float3 A2 = Tonemap_Bleach * color.rgb;
    float3 mixRGB = A2 * newColor;
    color.rgb += ((1.0f - A2) * mixRGB);
    float3 middlegray = dot(color,(1.0/3.0));
    float3 diffcolor = color - middlegray;
    colorInput.rgb = (color + diffcolor * Tonemap_Saturation)/(1+(diffcolor * Tonemap_Saturation));
    return colorInput;
}
"#;

const LUMA_SHARPEN: &str = r#"float4 LumaSharpenMain(PsQuad vert, float4 color) : SV_Target
{
const float3 Luma_CoefLuma = float3(0.2126, 0.7152, 0.0722);
const float Luma_sharp_strength = @p0@;
const float Luma_sharp_clamp = @p1@;
const float Luma_pattern = @p2@;
const float Luma_offset_bias = @p3@;
const float Luma_show_sharpen = 0;
float3 blur_ori;
    uint2 uTDim, uDDim;
    srcTex.GetDimensions(uTDim.x,uTDim.y);
    int3 iTexCoord = int3(uTDim.x * vert.texcoord.x, uTDim.y * vert.texcoord.y, 0);
	float px = 1;
	float py = 1;
  float3 ori = color.rgb;
  float3 sharp_strength_luma = (Luma_CoefLuma * Luma_sharp_strength);
  if (Luma_pattern == 1) {
    iTexCoord = int3(uTDim.x * vert.texcoord.x + px * 0.5 * Luma_offset_bias, uTDim.y * vert.texcoord.y - py * 0.5 * Luma_offset_bias, 0);
	   blur_ori = srcTex.Load(iTexCoord).rgb;
    iTexCoord = int3(uTDim.x * vert.texcoord.x - px * 0.5 * Luma_offset_bias, uTDim.y * vert.texcoord.y - py * 0.5 * Luma_offset_bias, 0);
	blur_ori += srcTex.Load(iTexCoord).rgb;
    iTexCoord = int3(uTDim.x * vert.texcoord.x + px * 0.5 * Luma_offset_bias, uTDim.y * vert.texcoord.y + py * 0.5 * Luma_offset_bias, 0);
	blur_ori += srcTex.Load(iTexCoord).rgb;
    iTexCoord = int3(uTDim.x * vert.texcoord.x - px * 0.5 * Luma_offset_bias, uTDim.y * vert.texcoord.y + py * 0.5 * Luma_offset_bias, 0);
	blur_ori += srcTex.Load(iTexCoord).rgb;
	blur_ori *= 0.25;
 }
 else if (Luma_pattern == 2) {
    iTexCoord = int3(uTDim.x * vert.texcoord.x + px * 0.5 * Luma_offset_bias, uTDim.y * vert.texcoord.y - py * 0.5 * Luma_offset_bias, 0);
	   blur_ori = srcTex.Load(iTexCoord).rgb;
    iTexCoord = int3(uTDim.x * vert.texcoord.x - px * 0.5 * Luma_offset_bias, uTDim.y * vert.texcoord.y - py * 0.5 * Luma_offset_bias, 0);
	blur_ori += srcTex.Load(iTexCoord).rgb;
    iTexCoord = int3(uTDim.x * vert.texcoord.x + px * 0.5 * Luma_offset_bias, uTDim.y * vert.texcoord.y + py * 0.5 * Luma_offset_bias, 0);
	blur_ori += srcTex.Load(iTexCoord).rgb;
    iTexCoord = int3(uTDim.x * vert.texcoord.x - px * 0.5 * Luma_offset_bias, uTDim.y * vert.texcoord.y + py * 0.5 * Luma_offset_bias, 0);
	blur_ori += srcTex.Load(iTexCoord).rgb;
	blur_ori *= 0.25;
 }
 else if (Luma_pattern == 3) {
	iTexCoord = int3(uTDim.x * vert.texcoord.x + px * 0.4 * Luma_offset_bias, uTDim.y * vert.texcoord.y - py * 1.2 * Luma_offset_bias, 0);
	blur_ori = srcTex.Load(iTexCoord).rgb;
    iTexCoord = int3(uTDim.x * vert.texcoord.x - px * 1.2 * Luma_offset_bias, uTDim.y * vert.texcoord.y - py * 0.4 * Luma_offset_bias, 0);
	blur_ori += srcTex.Load(iTexCoord).rgb;
    iTexCoord = int3(uTDim.x * vert.texcoord.x + px * 1.2 * Luma_offset_bias, uTDim.y * vert.texcoord.y + py * 0.4 * Luma_offset_bias, 0);
	blur_ori += srcTex.Load(iTexCoord).rgb;
    iTexCoord = int3(uTDim.x * vert.texcoord.x - px * 0.4 * Luma_offset_bias, uTDim.y * vert.texcoord.y + py * 1.2 * Luma_offset_bias, 0);
	blur_ori += srcTex.Load(iTexCoord).rgb;
	blur_ori *= 0.25;
	sharp_strength_luma *= 0.51;
 }
 else if (Luma_pattern == 4) {
	iTexCoord = int3(uTDim.x * vert.texcoord.x + px * 0.5, uTDim.y * vert.texcoord.y - py * Luma_offset_bias, 0);
	blur_ori = srcTex.Load(iTexCoord).rgb;
    iTexCoord = int3(uTDim.x * vert.texcoord.x - px * 0.5 * Luma_offset_bias, uTDim.y * vert.texcoord.y - py * 0.5, 0);
	blur_ori += srcTex.Load(iTexCoord).rgb;
    iTexCoord = int3(uTDim.x * vert.texcoord.x + px * Luma_offset_bias, uTDim.y * vert.texcoord.y + py * 0.5, 0);
	blur_ori += srcTex.Load(iTexCoord).rgb;
    iTexCoord = int3(uTDim.x * vert.texcoord.x - px * 0.5, uTDim.y * vert.texcoord.y + py * Luma_offset_bias, 0);
	blur_ori += srcTex.Load(iTexCoord).rgb;
	blur_ori /= 4.0;
	sharp_strength_luma *= 0.666;
 }
	float3 sharp = ori - blur_ori;
	float4 sharp_strength_luma_clamp = float4(sharp_strength_luma * (0.5 / Luma_sharp_clamp),0.5);
	float sharp_luma = saturate(dot(float4(sharp,1.0), sharp_strength_luma_clamp));
	sharp_luma = (Luma_sharp_clamp * 2.0) * sharp_luma - Luma_sharp_clamp;
	color.rgb = ori + sharp_luma;
	return color;
}"#;
